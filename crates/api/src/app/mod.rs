//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: metadata and product service wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: response DTOs built from domain types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use agora_metadata::Metadata;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(metadata: Arc<Metadata>, moderation_api_key: String) -> Router {
    let services = Arc::new(services::build_services(metadata));
    let moderation_state = middleware::ModerationState::new(moderation_api_key);

    // Moderation routes: require the moderator key.
    let moderation = routes::moderation::router().layer(axum::middleware::from_fn_with_state(
        moderation_state,
        middleware::moderation_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .nest("/moderation", moderation)
        .layer(Extension(services))
}
