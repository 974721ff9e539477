//! Authentication
//!
//! - [`credentials`]: read-only user store (argon2 hashes), built at startup
//! - [`service`]: JWT issuance and validation
//! - [`middleware`]: bearer-token guard for protected routes
//! - [`handlers`]: `POST /token` (OAuth2 password grant)

pub mod credentials;
pub mod handlers;
pub mod middleware;
pub mod service;

pub use credentials::{CredentialStore, UserRecord};
pub use service::{AccessToken, AuthError, AuthService, Claims};
