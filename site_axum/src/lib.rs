use axum::{
    Json, Router,
    body::Body,
    http::{
        Method, Request, StatusCode,
        header::{self, ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, ORIGIN},
    },
    response::IntoResponse,
};
use serde_json::json;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer,
};

/// Runs an Axum router in either local development mode or Lambda runtime mode.
///
/// In debug builds (`#[cfg(debug_assertions)]`), the router is served on
/// `addr` using a standard Axum server, and shuts down gracefully on Ctrl+C
/// or SIGTERM.
///
/// In release builds, the router is wrapped with the Lambda runtime adapter
/// and executed as a Lambda function. `addr` is not used there.
///
/// # Errors
///
/// Returns an error if:
/// - The local server fails to bind to the address (debug mode)
/// - The Lambda runtime fails to start (release mode)
pub async fn run_app(
    app: Router,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Starting local development server on http://{addr}");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    }

    #[cfg(not(debug_assertions))]
    {
        use lambda_http::tower;

        tracing::debug!("running under the Lambda runtime, ignoring {addr}");

        let app = tower::ServiceBuilder::new()
            .layer(axum_aws_lambda::LambdaLayer::default().trim_stage())
            .service(app);

        lambda_http::run(app)
            .await
            .map_err(|e| e as Box<dyn std::error::Error>)?;
    }

    Ok(())
}

/// Adds the request logging, CORS and compression layers every service
/// shares.
///
/// CORS is open to any origin for `GET` only; the services expose
/// read-only data to the browser.
pub fn with_common_layers(router: Router) -> Router {
    // Set up a trace layer
    let trace_layer = TraceLayer::new_for_http().on_request(
        |request: &Request<Body>, _: &tracing::Span| {
            tracing::info!(
                "received request: {method} {path}",
                method = request.method(),
                // the query string may carry credentials, keep it out
                path = request.uri().path()
            );
        },
    );

    let cors_layer = CorsLayer::new()
        .allow_headers([ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, ORIGIN])
        .allow_methods([Method::GET])
        .allow_origin(tower_http::cors::Any);

    let compression_layer = CompressionLayer::new().gzip(true).deflate(true);

    router
        .layer(cors_layer)
        .layer(trace_layer)
        .layer(compression_layer)
}

/// JSON 404 used as the router fallback.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "application/json")],
        Json(json!({
            "message": "not found",
        })),
    )
}

#[cfg(debug_assertions)]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::warn!("signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use tower::ServiceExt;

    fn router() -> Router {
        with_common_layers(
            Router::new()
                .route("/ping", get(|| async { "pong" }))
                .fallback(not_found),
        )
    }

    #[tokio::test]
    async fn test_fallback_returns_json_not_found() {
        let response = router()
            .oneshot(Request::get("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "message": "not found" }));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let response = router()
            .oneshot(
                Request::get("/ping")
                    .header(ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
