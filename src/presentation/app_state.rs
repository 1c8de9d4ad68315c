// Application state for HTTP handlers
use crate::application::scheduler::RefreshScheduler;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<RefreshScheduler>,
}
