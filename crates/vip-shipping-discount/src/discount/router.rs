use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::configuration::{Configuration, DISCOUNT_TITLE, METAFIELD_KEY, METAFIELD_NAMESPACE};
use super::function::{run, FunctionRunInput};

/// Router exposing the discount function to the checkout pipeline.
pub fn discount_router() -> Router {
    Router::new()
        .route("/api/v1/discounts/shipping/run", post(run_handler))
        .route("/api/v1/discounts/shipping/template", get(template_handler))
}

pub(crate) async fn run_handler(Json(input): Json<FunctionRunInput>) -> Response {
    match run(&input) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(violation) => {
            warn!(path = %violation.path, "rejecting checkout payload");
            let payload = json!({
                "error": violation.to_string(),
                "path": violation.path,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

/// Metafield the admin app writes when a merchant creates a rule.
#[derive(Debug, Clone, Serialize)]
pub struct RuleTemplate {
    pub title: &'static str,
    pub namespace: &'static str,
    pub key: &'static str,
    pub value: String,
    pub configuration: Configuration,
}

impl RuleTemplate {
    pub fn new_rule() -> Self {
        let configuration = Configuration::new_rule_template();
        Self {
            title: DISCOUNT_TITLE,
            namespace: METAFIELD_NAMESPACE,
            key: METAFIELD_KEY,
            value: configuration.to_metafield_value(),
            configuration,
        }
    }
}

pub(crate) async fn template_handler() -> Json<RuleTemplate> {
    Json(RuleTemplate::new_rule())
}
