// Snapshot renderer trait - Consumers of published dashboard snapshots
use crate::domain::snapshot::DashboardSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait SnapshotRenderer: Send + Sync {
    /// Draw a snapshot produced by a completed step.
    async fn render(&self, snapshot: &DashboardSnapshot) -> anyhow::Result<()>;

    /// Redraw only the countdown between steps.
    async fn render_countdown(&self, snapshot: &DashboardSnapshot) -> anyhow::Result<()>;

    /// Fire-and-forget notification.
    async fn notify(&self, message: &str) -> anyhow::Result<()>;
}
