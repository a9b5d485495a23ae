use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use estimator::{build_output, estimate, render_report, REPORT_FILE_NAME};
use models::{FormulaConfig, FormulaPreset, HouseholdForm, Settings};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{repository::SettingsRepository, ApiError, Result};

pub type RepositoryState = Arc<dyn SettingsRepository>;

/// Body of the estimate and report endpoints
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub profile: HouseholdForm,
    #[serde(default)]
    pub preset: Option<FormulaPreset>,
    #[serde(default)]
    pub rate_per_kwh: Option<f64>,
    #[serde(default)]
    pub emission_factor: Option<f64>,
}

impl EstimateRequest {
    /// Unwraps the extracted body and rejects forms outside the widget ranges.
    fn checked(payload: std::result::Result<Json<Self>, JsonRejection>) -> Result<Self> {
        let Json(request) = payload?;
        let violations = request.profile.check_limits();
        if !violations.is_empty() {
            return Err(ApiError::OutOfRange(violations));
        }
        Ok(request)
    }

    fn formula_config(&self, settings: &Settings) -> FormulaConfig {
        settings
            .formula_config_for(self.preset)
            .with_overrides(self.rate_per_kwh, self.emission_factor)
    }
}

#[derive(Debug, Serialize)]
pub struct PresetEntry {
    pub preset: FormulaPreset,
    pub config: FormulaConfig,
}

/// POST /api/estimate
/// Computes consumption, summary, chart series, tips and report for one form
pub async fn post_estimate(
    State(repo): State<RepositoryState>,
    payload: std::result::Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let request = EstimateRequest::checked(payload)?;
    let settings = repo.fetch_settings().await?;
    let config = request.formula_config(&settings);

    let output = build_output(request.profile.into_profile(), &config)?;

    Ok(Json(output))
}

/// POST /api/report
/// Returns the plain-text report as a download
pub async fn post_report(
    State(repo): State<RepositoryState>,
    payload: std::result::Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let request = EstimateRequest::checked(payload)?;
    let settings = repo.fetch_settings().await?;
    let config = request.formula_config(&settings);

    let profile = request.profile.into_profile();
    let result = estimate(&profile, &config)?;
    let report = render_report(&profile, &result);

    let disposition = format!("attachment; filename=\"{}\"", REPORT_FILE_NAME);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(|e| ApiError::Internal(e.to_string()))?,
    );

    Ok((StatusCode::OK, headers, report))
}

/// GET /api/presets
/// Lists the built-in formula presets
pub async fn get_presets() -> impl IntoResponse {
    let presets: Vec<PresetEntry> = FormulaPreset::ALL
        .iter()
        .map(|preset| PresetEntry {
            preset: *preset,
            config: preset.config(),
        })
        .collect();
    Json(presets)
}

/// GET /api/settings
/// Returns the active settings and the formula they resolve to
pub async fn get_settings(State(repo): State<RepositoryState>) -> Result<impl IntoResponse> {
    let settings = repo.fetch_settings().await?;
    let formula = settings.formula_config();

    Ok(Json(serde_json::json!({
        "settings": settings,
        "formula": formula,
    })))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "energy-estimator-api"
    }))
}

/// POST /api/cache/invalidate
/// Drops cached settings so the next request rereads settings.json
pub async fn invalidate_cache(State(repo): State<RepositoryState>) -> impl IntoResponse {
    repo.invalidate_cache().await;

    Json(serde_json::json!({
        "status": "success",
        "message": "Cache invalidated. Settings will be reloaded on next request."
    }))
}
