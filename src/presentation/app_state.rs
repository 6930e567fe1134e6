// Application state shared by the command and render loops
use crate::application::live_service::LiveDashboard;
use crate::application::snapshot_renderer::SnapshotRenderer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: LiveDashboard,
    pub renderer: Arc<dyn SnapshotRenderer>,
}
