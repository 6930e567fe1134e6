// Dashboard snapshot - Read-only view published after every state change
use super::clock::AdvanceMode;
use super::composition::CompositionSlice;
use super::detail::DetailRow;
use super::filters::Filters;
use super::kpi::KpiSnapshot;
use super::window::Bucket;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Number of completed steps since initialization.
    pub sequence: u64,
    pub last_mode: Option<AdvanceMode>,
    pub last_real_update: DateTime<Local>,
    pub virtual_cursor: DateTime<Local>,
    pub auto_refresh: bool,
    /// Seconds until the next automatic step. `None` while paused.
    pub countdown: Option<u32>,
    pub kpi: Arc<KpiSnapshot>,
    pub composition: Arc<[CompositionSlice]>,
    pub window: Vec<Bucket>,
    pub rows: Arc<[DetailRow]>,
    pub applied_filters: Filters,
    pub filter_draft: Filters,
}
