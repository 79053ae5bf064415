use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use agora_core::ProductId;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        // POST takes a category slug, GET a product id.
        .route("/:key", post(create_product).get(get_product))
        .route("/by-category/:slug", get(products_by_category))
}

/// Submit a product. The body is the raw fieldset -> fields JSON object.
pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(category_slug): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    match services.products.create_product(&category_slug, &body) {
        Ok(listed) => (StatusCode::CREATED, Json(listed)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_product_id(),
    };

    match services.products.get_product(id) {
        Ok(listed) => Json(listed).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Approved products of one category.
pub async fn products_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    match services.products.products_by_category(&slug) {
        Ok(listed) => Json(listed).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
