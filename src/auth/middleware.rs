use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::AuthError;
use crate::error::ApiError;
use crate::gateway::state::AppState;

/// Reject requests without a valid bearer token; on success the token's
/// [`Claims`](super::Claims) are available to handlers as an `Extension`.
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    let claims = state.auth.validate_header(auth_header)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
