use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{pkg::server::state::AppState, prelude::Result};

/// Gate for protected routes. Validates the bearer token on every call and
/// injects the decoded identity; on any failure the inner handler is never
/// invoked.
pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let raw_header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let identity = state.tokens.validate(raw_header).map_err(|e| {
        tracing::warn!("authentication denied: {}", e);
        e
    })?;
    request.extensions_mut().insert(Arc::new(identity));
    Ok(next.run(request).await)
}
