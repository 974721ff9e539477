//! Gateway error type.
//!
//! Every handler returns `Result<_, ApiError>`. Component errors
//! ([`CalcError`], [`AuthError`], [`MediaError`]) convert into it at the
//! boundary and it renders as the unified `{code, msg}` envelope.
//!
//! | Variant            | HTTP | code |
//! |--------------------|------|------|
//! | `InvalidInput`     | 400  | 1001 |
//! | `Domain`           | 400  | 1004 |
//! | `InvalidOperation` | 400  | 1005 |
//! | `MissingAuth`      | 401  | 2001 |
//! | `Authentication`   | 401  | 2002 |
//! | `NotFound`         | 404  | 4004 |
//! | `Internal`         | 500  | 5000 |

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::auth::AuthError;
use crate::calculator::CalcError;
use crate::gateway::types::{ApiResponse, error_codes};
use crate::media::MediaError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Mathematically undefined operation
    #[error("{0}")]
    Domain(String),

    #[error("unknown operation: {0}")]
    InvalidOperation(String),

    /// Malformed or unsafe input
    #[error("{0}")]
    InvalidInput(String),

    #[error("missing authorization header")]
    MissingAuth,

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => error_codes::INVALID_PARAMETER,
            Self::Domain(_) => error_codes::DOMAIN_ERROR,
            Self::InvalidOperation(_) => error_codes::INVALID_OPERATION,
            Self::MissingAuth => error_codes::MISSING_AUTH,
            Self::Authentication(_) => error_codes::AUTH_FAILED,
            Self::NotFound(_) => error_codes::NOT_FOUND,
            Self::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::Domain(_) | Self::InvalidOperation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingAuth | Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal errors never leak their cause.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!("Unhandled internal error: {:?}", e);
        }

        let status = self.http_status();
        let body = ApiResponse::<()>::error(self.code(), self.public_message());
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<CalcError> for ApiError {
    fn from(e: CalcError) -> Self {
        match e {
            CalcError::Domain(msg) => Self::Domain(msg.to_string()),
            CalcError::InvalidOperation(name) => Self::InvalidOperation(name),
            CalcError::InvalidInput(msg) => Self::InvalidInput(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Internal(msg) => Self::Internal(anyhow::anyhow!(msg)),
            other => Self::Authentication(other.to_string()),
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(e: MediaError) -> Self {
        match e {
            // Rejected names look exactly like missing files to the client.
            MediaError::InvalidName(name) => {
                tracing::warn!(track = %name, "Rejected unsafe track name");
                Self::NotFound("track not found".to_string())
            }
            MediaError::NotFound(_) => Self::NotFound("track not found".to_string()),
            MediaError::Io(e) => Self::Internal(anyhow::Error::new(e).context("media read failed")),
        }
    }
}
