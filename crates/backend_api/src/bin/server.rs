use backend_api::{run_server, FileSettingsRepository};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings_path =
        PathBuf::from(env::var("SETTINGS_PATH").unwrap_or_else(|_| "settings.json".to_string()));
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    println!("Energy Estimator API Server");
    println!("===========================");
    println!("Settings path: {}", settings_path.display());
    println!("Listening on: {}:{}", host, port);
    println!();

    let repo = Arc::new(FileSettingsRepository::new(settings_path));

    run_server(repo, &host, port).await?;

    Ok(())
}
