use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::gateway::state::AppState;

/// OAuth2 password-grant request (form-encoded)
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    #[schema(example = "testuser")]
    pub username: String,
    #[schema(example = "testpass")]
    pub password: String,
    /// Must be `password` when present
    #[serde(default)]
    pub grant_type: Option<String>,
    /// Accepted and ignored
    #[serde(default)]
    pub scope: Option<String>,
}

/// OAuth2 token response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Lifetime in seconds
    #[schema(example = 1800)]
    pub expires_in: i64,
}

/// Issue an access token
///
/// POST /token
#[utoipa::path(
    post,
    path = "/token",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Malformed form body"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    form: Result<Form<TokenRequest>, FormRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Form(req) = form.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    if let Some(grant_type) = req.grant_type.as_deref() {
        if grant_type != "password" {
            return Err(ApiError::InvalidInput(format!(
                "unsupported grant_type: {}",
                grant_type
            )));
        }
    }

    let auth = state.auth.clone();
    let username = req.username.clone();
    let issued = tokio::task::spawn_blocking(move || auth.issue(&req.username, &req.password))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("token task failed: {}", e)))?;

    match issued {
        Ok(token) => {
            tracing::info!(user = %token.subject, "Access token issued");
            Ok(Json(TokenResponse {
                access_token: token.token,
                token_type: "bearer".to_string(),
                expires_in: state.auth.token_ttl().num_seconds(),
            }))
        }
        Err(e) => {
            tracing::warn!(user = %username, "Login failed: {}", e);
            Err(e.into())
        }
    }
}
