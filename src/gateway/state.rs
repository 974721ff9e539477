use std::sync::Arc;

use crate::auth::AuthService;
use crate::media::MediaLibrary;
use crate::oplog::OperationLogger;

/// Gateway shared state. Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Token issuance / validation
    pub auth: Arc<AuthService>,
    /// Fire-and-forget calculation log
    pub oplog: OperationLogger,
    /// Audio files under the media root
    pub media: Arc<MediaLibrary>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, oplog: OperationLogger, media: Arc<MediaLibrary>) -> Self {
        Self { auth, oplog, media }
    }
}
