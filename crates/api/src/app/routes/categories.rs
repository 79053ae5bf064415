use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(root_category))
        .route("/:slug", get(get_category))
        .route("/:slug/fieldsets", get(category_fieldsets))
        .route("/:slug/schema", get(category_schema))
}

/// Synthetic root whose subcategories are the top-level categories.
pub async fn root_category(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(dto::CategoryResponse::from(&services.metadata.root_category()))
}

pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    match services.metadata.category_by_slug(&slug) {
        Ok(category) => Json(dto::CategoryResponse::from(category)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn category_fieldsets(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    match services.metadata.fieldsets_for_category(&slug) {
        Ok(fieldsets) => {
            let body: Vec<_> = fieldsets
                .into_iter()
                .map(|(fieldset, schema)| dto::FieldsetResponse::new(fieldset, schema))
                .collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn category_schema(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    match services.metadata.category_schema_json(&slug) {
        Ok(schema) => Json(schema).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
