//! # Axum Helpers
//!
//! Shared HTTP plumbing for the taskboard services.
//!
//! - **[`errors`]**: the JSON error envelope and the [`AppError`] every domain error converts into
//! - **[`extractors`]**: body extractors that reject through [`AppError`]
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, OPENAPI_PATH, create_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::JsonBody;

/// Body returned by endpoints whose only result is an acknowledgement
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }
}
