use async_trait::async_trait;
use models::Settings;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;

/// Source of the estimator settings.
/// Lets handlers run against a settings file or a fixed in-memory value.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn fetch_settings(&self) -> Result<Settings>;
    async fn invalidate_cache(&self);
}

/// File-based implementation that reads settings.json once and caches it
pub struct FileSettingsRepository {
    settings_path: PathBuf,
    cache: Arc<RwLock<Option<Settings>>>,
}

impl FileSettingsRepository {
    pub fn new<P: AsRef<Path>>(settings_path: P) -> Self {
        Self {
            settings_path: settings_path.as_ref().to_path_buf(),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// A missing file means built-in defaults; a malformed one is an error.
    async fn load_settings(&self) -> Result<Settings> {
        if !tokio::fs::try_exists(&self.settings_path).await? {
            tracing::warn!(
                "settings file {} not found, using defaults",
                self.settings_path.display()
            );
            return Ok(Settings::default());
        }
        let content = tokio::fs::read_to_string(&self.settings_path).await?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }
}

#[async_trait]
impl SettingsRepository for FileSettingsRepository {
    async fn fetch_settings(&self) -> Result<Settings> {
        {
            let cache = self.cache.read().await;
            if let Some(ref settings) = *cache {
                return Ok(settings.clone());
            }
        }

        let settings = self.load_settings().await?;

        {
            let mut cache = self.cache.write().await;
            *cache = Some(settings.clone());
        }

        Ok(settings)
    }

    async fn invalidate_cache(&self) {
        let mut cache = self.cache.write().await;
        *cache = None;
    }
}

/// Fixed settings, for tests and embedding
pub struct InMemorySettingsRepository {
    settings: Settings,
}

impl InMemorySettingsRepository {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn fetch_settings(&self) -> Result<Settings> {
        Ok(self.settings.clone())
    }

    async fn invalidate_cache(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::FormulaPreset;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("backend_api_{}_{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let repo = FileSettingsRepository::new(temp_path("absent.json"));

        let settings = repo.fetch_settings().await.unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_cache_until_invalidated() {
        let path = temp_path("cached.json");
        tokio::fs::write(&path, r#"{ "preset": "flat_rate" }"#).await.unwrap();
        let repo = FileSettingsRepository::new(&path);

        assert_eq!(repo.fetch_settings().await.unwrap().preset, FormulaPreset::FlatRate);

        tokio::fs::write(&path, r#"{ "preset": "detailed" }"#).await.unwrap();
        assert_eq!(repo.fetch_settings().await.unwrap().preset, FormulaPreset::FlatRate);

        repo.invalidate_cache().await;
        assert_eq!(repo.fetch_settings().await.unwrap().preset, FormulaPreset::Detailed);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let path = temp_path("broken.json");
        tokio::fs::write(&path, "{ nope").await.unwrap();
        let repo = FileSettingsRepository::new(&path);

        assert!(repo.fetch_settings().await.is_err());

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
