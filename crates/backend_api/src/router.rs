use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, repository::SettingsRepository};

/// Create the main application router with all API endpoints
pub fn create_router(repo: Arc<dyn SettingsRepository>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Estimation
        .route("/api/estimate", post(handlers::post_estimate))
        .route("/api/report", post(handlers::post_report))
        // Configuration
        .route("/api/presets", get(handlers::get_presets))
        .route("/api/settings", get(handlers::get_settings))
        .route("/api/cache/invalidate", post(handlers::invalidate_cache))
        .with_state(repo)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemorySettingsRepository;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use models::{EstimateOutput, FormulaPreset, Settings};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(settings: Settings) -> Router {
        create_router(Arc::new(InMemorySettingsRepository::new(settings)))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn reference_body() -> Value {
        json!({
            "profile": {
                "name": "Sana",
                "age": 31,
                "city": "Jaipur",
                "area": "Malviya Nagar",
                "residence_type": "Flat",
                "bedroom_config": "2BHK",
                "has_ac": true,
                "ac_count": 2,
                "ac_hours": 6,
                "has_fridge": true,
                "fridge_count": 1,
                "has_washing_machine": false,
                "washing_machine_count": 2,
                "washing_machine_hours": 5
            }
        })
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Settings::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_estimate_reference_household() {
        let response = app(Settings::default())
            .oneshot(post_json("/api/estimate", reference_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let output: EstimateOutput = serde_json::from_slice(&bytes).unwrap();

        assert!((output.result.daily_total_kwh - 24.6).abs() < 1e-9);
        assert!((output.result.monthly_cost - 3690.0).abs() < 1e-9);
        assert_eq!(output.result.appliance_energy_kwh.washing_machine, 0.0);
        assert_eq!(output.profile.washing_machine, None);
        assert_eq!(output.breakdown.len(), 4);
    }

    #[tokio::test]
    async fn test_estimate_uses_settings_and_request_overrides() {
        let settings = Settings {
            preset: FormulaPreset::FlatRate,
            rate_per_kwh: Some(6.0),
            ..Settings::default()
        };
        let mut body = reference_body();
        body["emission_factor"] = json!(0.5);

        let response = app(settings)
            .oneshot(post_json("/api/estimate", body))
            .await
            .unwrap();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let output: EstimateOutput = serde_json::from_slice(&bytes).unwrap();

        // 3.6 base + AC 3 + fridge 3
        assert_eq!(output.metadata.preset, FormulaPreset::FlatRate);
        assert!((output.result.daily_total_kwh - 9.6).abs() < 1e-9);
        assert!((output.result.monthly_cost - 9.6 * 30.0 * 6.0).abs() < 1e-6);
        assert!((output.result.daily_co2_kg - 4.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_blank_name_is_unprocessable() {
        let mut body = reference_body();
        body["profile"]["name"] = json!("   ");

        let response = app(Settings::default())
            .oneshot(post_json("/api/estimate", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(error["error"].as_str().unwrap().contains("name"));
    }

    async fn error_body(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: Value = serde_json::from_slice(&bytes).unwrap();
        error["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_out_of_range_form_is_unprocessable() {
        let mut body = reference_body();
        body["profile"]["age"] = json!(0);
        body["profile"]["ac_count"] = json!(50);
        body["profile"]["ac_hours"] = json!(100);

        for uri in ["/api/estimate", "/api/report"] {
            let response = app(Settings::default())
                .oneshot(post_json(uri, body.clone()))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            let message = error_body(response).await;
            assert!(message.contains("'ac_count' is 50, expected 1..=5"));
            assert!(message.contains("'age' is 0"));
        }
    }

    #[tokio::test]
    async fn test_stale_out_of_range_values_are_accepted() {
        let mut body = reference_body();
        body["profile"]["washing_machine_hours"] = json!(99);

        let response = app(Settings::default())
            .oneshot(post_json("/api/estimate", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_undecodable_body_gets_json_error() {
        let mut body = reference_body();
        body["profile"]["bedroom_config"] = json!("5BHK");

        let response = app(Settings::default())
            .oneshot(post_json("/api/estimate", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(error_body(response).await.starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_missing_content_type_gets_json_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/report")
            .body(Body::from(reference_body().to_string()))
            .unwrap();

        let response = app(Settings::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(error_body(response).await.starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_report_download() {
        let response = app(Settings::default())
            .oneshot(post_json("/api/report", reference_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"energy_report.txt\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Energy Report for Sana"));
        assert!(text.contains("Monthly Cost: ₹3690"));
    }

    #[tokio::test]
    async fn test_presets_listed() {
        let response = app(Settings::default())
            .oneshot(Request::builder().uri("/api/presets").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let presets: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(presets.as_array().unwrap().len(), 2);
        assert_eq!(presets[1]["preset"], "flat_rate");
        assert_eq!(presets[0]["config"]["rate_per_kwh"], 5.0);
    }
}
