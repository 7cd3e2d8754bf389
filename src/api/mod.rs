// src/api/mod.rs

//! HTTP route layer.
//!
//! The router is built once at startup from [`routes`]; handlers validate
//! query parameters, call [`NoticeService`] and wrap results in the JSON
//! envelope. Mapping core errors to status codes happens in [`ApiError`].

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, get};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Config};
use crate::services::NoticeService;

pub use handlers::{ListParams, PagesParams, SearchParams};

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub service: NoticeService,
    pub api: ApiConfig,
    /// Upstream listing URL, advertised by the root endpoint
    pub source_url: String,
    /// (path, description) of every endpoint, advertised by the root endpoint
    pub endpoints: Vec<(&'static str, &'static str)>,
}

impl AppState {
    pub fn new(config: &Config, service: NoticeService) -> Self {
        Self {
            service,
            api: config.api.clone(),
            source_url: config.upstream.list_url(),
            endpoints: routes()
                .into_iter()
                .map(|(path, about, _)| (path, about))
                .collect(),
        }
    }
}

/// A public endpoint: path, description, handler.
pub type Route = (&'static str, &'static str, MethodRouter<Arc<AppState>>);

/// Every public endpoint, in registration order.
pub fn routes() -> Vec<Route> {
    vec![
        ("/", "Service information", get(handlers::root)),
        ("/health", "Health check", get(handlers::health)),
        (
            "/api/notices",
            "Notice list (page, limit)",
            get(handlers::list_notices),
        ),
        (
            "/api/notices/:detail_id",
            "Notice detail",
            get(handlers::notice_detail),
        ),
        (
            "/api/search",
            "Keyword search (keyword, pages)",
            get(handlers::search_notices),
        ),
        (
            "/api/stats",
            "Per-court statistics (pages)",
            get(handlers::court_stats),
        ),
    ]
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes()
        .into_iter()
        .fold(Router::new(), |router, (path, _, handler)| {
            router.route(path, handler)
        })
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| AppError::config(format!("api.bind {addr:?}: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("HTTP server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Core error rendered as a JSON error envelope.
#[derive(Debug)]
pub struct ApiError(AppError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Parse(_) => StatusCode::NOT_FOUND,
            AppError::Fetch(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            AppError::Parse(_) => "공고를 찾을 수 없습니다".to_string(),
            AppError::Fetch(e) => format!("upstream unavailable: {e}"),
            other => other.to_string(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self.0);
        } else {
            log::info!("Request rejected: {}", self.0);
        }
        let body = Json(json!({ "success": false, "error": self.message() }));
        (status, body).into_response()
    }
}
