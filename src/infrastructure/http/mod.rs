pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    extract::Request,
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeFile, trace::TraceLayer};

use crate::controllers::{health, history::HistoryController, speech::SpeechController};
use crate::domain::history::HistoryService;
use crate::infrastructure::config::Config;

/// Assemble every route of the service
pub fn build_router(
    index_page: &Path,
    speech_controller: Arc<SpeechController>,
    history_controller: Arc<HistoryController>,
    history_service: Arc<HistoryService>,
) -> Router {
    let speech_routes = Router::new()
        .route("/preview-voice", post(SpeechController::preview_voice))
        .route("/synthesize", post(SpeechController::synthesize))
        .with_state(speech_controller);

    // Catch-all: nested names are left to the containment check
    let history_routes = Router::new()
        .route("/history-list", get(HistoryController::list))
        .route("/history/:filename", get(HistoryController::serve))
        .route("/history/delete/*filename", delete(HistoryController::delete))
        .with_state(history_controller);

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(history_service);

    Router::new()
        .route_service("/", ServeFile::new(index_page))
        .merge(speech_routes)
        .merge(history_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                    let request_id = request
                        .extensions()
                        .get::<RequestId>()
                        .map(|id| id.0.as_str())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(CorsLayer::permissive()),
        )
}

/// Start the HTTP server and run until Ctrl-C
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
