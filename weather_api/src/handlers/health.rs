use axum::response::IntoResponse;
use serde_json::json;
use tracing::instrument;

#[instrument]
pub async fn handler() -> impl IntoResponse {
    tracing::info!("health check");

    axum::Json(json!({ "status" : "UP" }))
}
