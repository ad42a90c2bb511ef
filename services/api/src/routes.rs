use crate::infra::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use vip_shipping_discount::config::AppConfig;
use vip_shipping_discount::discount::discount_router;

/// Full service router: discount routes, probes, and the configured payload bound.
pub(crate) fn app(config: &AppConfig, state: AppState) -> axum::Router {
    with_discount_routes()
        .layer(DefaultBodyLimit::max(config.function.max_input_bytes))
        .layer(Extension(state))
}

pub(crate) fn with_discount_routes() -> axum::Router {
    discount_router()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;
    use vip_shipping_discount::config::{
        AppEnvironment, FunctionConfig, ServerConfig, TelemetryConfig,
    };

    fn app_config(max_input_bytes: usize) -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            function: FunctionConfig { max_input_bytes },
        }
    }

    fn run_request(payload: &serde_json::Value) -> Request<Body> {
        Request::post("/api/v1/discounts/shipping/run")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    fn app_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        let state = app_state(false);
        let app = with_discount_routes().layer(Extension(state.clone()));

        let response = app
            .clone()
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            read_json_body(response).await,
            json!({ "status": "initializing" })
        );

        state.readiness.store(true, Ordering::Release);
        let response = app
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn discount_routes_are_mounted() {
        let app = with_discount_routes().layer(Extension(app_state(true)));

        let response = app
            .oneshot(run_request(&json!({ "cart": { "deliveryGroups": [] } })))
            .await
            .expect("route responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json_body(response).await, json!({ "discounts": [] }));
    }

    #[tokio::test]
    async fn payloads_over_the_configured_limit_are_rejected() {
        let options: Vec<serde_json::Value> = (0..50)
            .map(|index| json!({ "title": "Standard", "handle": format!("standard-{index}") }))
            .collect();
        let oversized = json!({ "cart": { "deliveryGroups": [ { "deliveryOptions": options } ] } });
        assert!(oversized.to_string().len() > 256);

        let response = app(&app_config(256), app_state(true))
            .oneshot(run_request(&oversized))
            .await
            .expect("route responds");

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn payloads_within_the_configured_limit_are_evaluated() {
        let small = json!({ "cart": { "deliveryGroups": [] } });
        assert!(small.to_string().len() < 256);

        let response = app(&app_config(256), app_state(true))
            .oneshot(run_request(&small))
            .await
            .expect("route responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json_body(response).await, json!({ "discounts": [] }));
    }

    #[tokio::test]
    async fn metrics_are_exposed_as_prometheus_text() {
        let response = app(&app_config(1024), app_state(true))
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("route responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
