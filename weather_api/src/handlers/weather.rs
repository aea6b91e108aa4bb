use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::instrument;

use crate::structs::{AppContext, ErrorResponse};

/// Proxies the current conditions for the configured location.
///
/// The request carries no parameters; the key, location and air-quality
/// flag all come from the context. Upstream failures never escape as
/// faults: they are logged and turned into `{ "error": ... }`, with status
/// 200 unless `weather_error_status` is set.
#[instrument(skip(ctx))]
pub async fn handler(State(ctx): State<Arc<AppContext>>) -> Response {
    match ctx.weather.current(&ctx.query).await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(e) => {
            tracing::error!("failed to fetch weather data: {e}");

            let status = if ctx.config.weather_error_status {
                e.status_code()
            } else {
                StatusCode::OK
            };

            (status, Json(ErrorResponse { error: e.message() })).into_response()
        }
    }
}
