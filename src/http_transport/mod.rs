//! REST gateway for MirAIe air conditioners
//!
//! A small axum application over the shared [`ControlService`]. Failures
//! are returned as `{"detail": ...}` with 400 for invalid input, 404 for
//! unknown devices and 500 for everything else.

pub mod handlers;

use crate::config::HttpConfig;
use crate::error::{MiraieError, Result};
use crate::services::ControlService;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Version reported by the root endpoint
pub const API_VERSION: &str = "1.0.0";
pub const SERVICE_NAME: &str = "MirAIe AC Control API";

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub control: ControlService,
}

/// Success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Error rendered as `{"detail": ...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    /// Map a service error; `context` prefixes server-side failures
    pub fn from_service(context: &str, error: MiraieError) -> Self {
        match error {
            MiraieError::InvalidInput(detail) => Self::bad_request(detail),
            e @ MiraieError::DeviceNotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                detail: e.to_string(),
            },
            e => {
                let code = e.to_error_code();
                warn!(
                    code = code.as_number(),
                    category = code.category(),
                    "{}: {}",
                    context,
                    e
                );
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    detail: format!("{context}: {e}"),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub type ApiResult = std::result::Result<Json<ApiResponse>, ApiError>;

/// Build the router. CORS is only attached when enabled.
pub fn create_router(control: ControlService, enable_cors: bool) -> Router {
    let state = Arc::new(AppState { control });

    let router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/devices", get(handlers::get_devices))
        .route("/devices/on", post(handlers::turn_on_devices))
        .route("/devices/off", post(handlers::turn_off_devices))
        .route("/devices/temperature", post(handlers::set_devices_temperature))
        .route("/device/control", post(handlers::control_device))
        .route("/test", post(handlers::run_test))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// HTTP transport server
pub struct HttpServer {
    control: ControlService,
    config: HttpConfig,
}

impl HttpServer {
    pub fn new(control: ControlService, config: HttpConfig) -> Self {
        Self { control, config }
    }

    /// Serve until Ctrl+C, then close the device session
    pub async fn start(self) -> Result<()> {
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|e| {
                MiraieError::connection(format!(
                    "Failed to bind to {}:{}: {e}",
                    self.config.host, self.config.port
                ))
            })?;
        let addr: SocketAddr = listener.local_addr()?;

        info!("HTTP server starting on http://{}", addr);
        info!("Health check: http://{}/health", addr);
        if self.config.enable_cors {
            info!("CORS: permissive");
        }

        let manager = self.control.manager().clone();
        let app = create_router(self.control, self.config.enable_cors);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| MiraieError::connection(format!("HTTP server error: {e}")))?;

        info!("HTTP server stopped, closing device session");
        manager.exit().await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
