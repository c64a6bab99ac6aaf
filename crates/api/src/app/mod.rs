//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: stores, backend and forecast service construction
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

use stratus_core::DomainResult;
use stratus_infra::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> DomainResult<Router> {
    let services = Arc::new(services::build_services(config)?);
    let flags = services.flags;

    Ok(routes::router(flags).layer(Extension(services)))
}
