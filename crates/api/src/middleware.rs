use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

/// Header carrying the moderator key.
pub const MODERATION_KEY_HEADER: &str = "x-moderation-api-key";

#[derive(Clone)]
pub struct ModerationState {
    api_key: Arc<str>,
}

impl ModerationState {
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self { api_key: api_key.into() }
    }
}

pub async fn moderation_middleware(
    State(state): State<ModerationState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let key = extract_moderation_key(req.headers())?;
    if !keys_match(key, &state.api_key) {
        tracing::debug!("moderation request with wrong key");
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}

fn extract_moderation_key(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(MODERATION_KEY_HEADER)
        .ok_or(StatusCode::FORBIDDEN)?;

    let key = header.to_str().map_err(|_| StatusCode::FORBIDDEN)?.trim();
    if key.is_empty() {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(key)
}

/// Compares in time independent of where the keys differ.
fn keys_match(given: &str, expected: &str) -> bool {
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}
