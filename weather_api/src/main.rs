/**
 * This is the main entrypoint for the `weather_api` lambda function.
 *
 * It serves the site's server-side routes: a proxy for the upstream weather
 * API that keeps the API key out of the browser, and the head metadata for
 * the single-page shell.
 */
use axum::{Router, routing::get};
use std::sync::Arc;

mod config;
mod handlers;
mod structs;
mod weatherapi;

use config::Config;
use structs::AppContext;

fn app(context: Arc<AppContext>) -> Router {
    let router = Router::new()
        .route("/api/weather", get(handlers::weather::handler))
        .route("/api/site", get(handlers::site::handler))
        .route("/api/health", get(handlers::health::handler))
        .fallback(site_axum::not_found)
        .with_state(context);

    site_axum::with_common_layers(router)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the application context (which also initializes tracing)
    let app_context =
        site_app::create_app_context::<AppContext, Config>().await?;

    let addr = app_context.config.listen_addr;

    site_axum::run_app(app(Arc::new(app_context)), addr).await
}
