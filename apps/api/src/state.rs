use std::sync::Arc;

use tokio::sync::Mutex;

use crate::resume::session::ResumeSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one editing session. Handlers hold the lock for the whole mutation,
    /// so readers only ever observe complete documents.
    pub session: Arc<Mutex<ResumeSession>>,
}

impl AppState {
    pub fn new(session: ResumeSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}
