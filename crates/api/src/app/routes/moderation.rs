use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use agora_core::ProductId;
use agora_products::ModerationCommand;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/pending", get(pending_products))
        .route("/products/:id/approve", post(approve_product))
        .route("/products/:id/reject", post(reject_product))
}

pub async fn pending_products(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.products.pending_products() {
        Ok(listed) => Json(listed).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn approve_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    moderate(&services, &id, ModerationCommand::Approve)
}

pub async fn reject_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    moderate(&services, &id, ModerationCommand::Reject)
}

fn moderate(services: &AppServices, id: &str, command: ModerationCommand) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_product_id(),
    };

    match services.products.moderate(id, command) {
        Ok(outcome) => Json(dto::ModerationResponse::from(&outcome)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
