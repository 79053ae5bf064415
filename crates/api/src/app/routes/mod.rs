use axum::Router;

pub mod categories;
pub mod moderation;
pub mod products;
pub mod system;

/// Router for the public catalogue endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/products", products::router())
}
