// Dashboard engine - Owns all live state and runs the step pipeline
use crate::application::aggregate_source;
use crate::application::wall_clock::WallClock;
use crate::domain::clock::{AdvanceMode, VirtualClock};
use crate::domain::composition::CompositionSlice;
use crate::domain::detail::DetailRow;
use crate::domain::filters::Filters;
use crate::domain::kpi::{KpiAccumulator, KpiChange, KpiSnapshot};
use crate::domain::snapshot::DashboardSnapshot;
use crate::domain::window::{Bucket, SlidingWindow};
use rand::RngCore;
use std::sync::Arc;

pub const DEFAULT_WINDOW_SIZE: usize = 30;
pub const DEFAULT_DETAIL_ROWS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub window_size: usize,
    pub detail_rows: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            detail_rows: DEFAULT_DETAIL_ROWS,
        }
    }
}

/// What a single step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub sequence: u64,
    pub mode: AdvanceMode,
    pub label: String,
    pub kpi: KpiChange,
}

pub struct DashboardEngine {
    settings: EngineSettings,
    wall_clock: Arc<dyn WallClock>,
    rng: Box<dyn RngCore + Send>,
    clock: VirtualClock,
    window: SlidingWindow,
    kpi: KpiAccumulator,
    composition: Arc<[CompositionSlice]>,
    rows: Arc<[DetailRow]>,
    applied_filters: Filters,
    sequence: u64,
    last_mode: Option<AdvanceMode>,
}

impl std::fmt::Debug for DashboardEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardEngine")
            .field("settings", &self.settings)
            .field("clock", &self.clock)
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl DashboardEngine {
    /// Build a fresh engine: window pre-seeded up to now, KPIs at baseline.
    pub fn new(
        settings: EngineSettings,
        wall_clock: Arc<dyn WallClock>,
        mut rng: Box<dyn RngCore + Send>,
    ) -> Self {
        let now = wall_clock.now();
        let window = SlidingWindow::initialize(settings.window_size, now, || {
            aggregate_source::seed_counts(&mut rng)
        });
        let composition = aggregate_source::composition(&mut rng).into();
        let rows = aggregate_source::detail_rows(&mut rng, settings.detail_rows).into();

        tracing::info!(
            window_size = settings.window_size,
            detail_rows = settings.detail_rows,
            "dashboard engine initialized"
        );

        Self {
            settings,
            wall_clock,
            rng,
            clock: VirtualClock::new(now),
            window,
            kpi: KpiAccumulator::initialize(),
            composition,
            rows,
            applied_filters: Filters::default(),
            sequence: 0,
            last_mode: None,
        }
    }

    /// Advance the clock, regenerate data, accumulate KPIs and slide the
    /// window, in that order.
    pub fn step(&mut self, mode: AdvanceMode) -> StepReport {
        let before = self.kpi.snapshot();

        let cursor = self.clock.advance(mode, self.wall_clock.now());

        let kpi = self
            .kpi
            .apply_increment(aggregate_source::kpi_delta(&mut self.rng));
        self.composition = aggregate_source::composition(&mut self.rng).into();
        self.rows = aggregate_source::detail_rows(&mut self.rng, self.settings.detail_rows).into();

        let bucket = Bucket::new(&cursor, aggregate_source::step_counts(&mut self.rng));
        let label = bucket.label().to_string();
        self.window.push_and_evict(bucket);

        self.sequence += 1;
        self.last_mode = Some(mode);
        self.debug_check_invariants(&before);

        tracing::debug!(sequence = self.sequence, ?mode, %label, ?kpi, "step applied");

        StepReport {
            sequence: self.sequence,
            mode,
            label,
            kpi,
        }
    }

    /// Record the criteria for display and force one auto-mode step. The
    /// criteria never narrow the generated data.
    pub fn apply_filters(&mut self, filters: Filters) -> StepReport {
        tracing::info!(?filters, "applying filters");
        self.applied_filters = filters;
        self.step(AdvanceMode::Auto)
    }

    pub fn snapshot(
        &self,
        countdown: Option<u32>,
        auto_refresh: bool,
        draft: &Filters,
    ) -> DashboardSnapshot {
        let clock = self.clock.state();
        DashboardSnapshot {
            sequence: self.sequence,
            last_mode: self.last_mode,
            last_real_update: clock.last_real_update,
            virtual_cursor: clock.virtual_cursor,
            auto_refresh,
            countdown,
            kpi: self.kpi.snapshot(),
            composition: Arc::clone(&self.composition),
            window: self.window.to_vec(),
            rows: Arc::clone(&self.rows),
            applied_filters: self.applied_filters.clone(),
            filter_draft: draft.clone(),
        }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    fn debug_check_invariants(&self, before: &KpiSnapshot) {
        let after = self.kpi.snapshot();
        debug_assert_eq!(self.window.len(), self.settings.window_size);
        debug_assert!(after.total_sold >= before.total_sold);
        debug_assert!(after.total_gross_revenue >= before.total_gross_revenue);
        debug_assert!(after.total_net_revenue >= before.total_net_revenue);
        debug_assert!(after.total_net_revenue <= after.total_gross_revenue);
    }
}

#[cfg(test)]
impl DashboardEngine {
    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn kpi(&self) -> Arc<KpiSnapshot> {
        self.kpi.snapshot()
    }

    pub fn clock_state(&self) -> crate::domain::clock::ClockState {
        self.clock.state()
    }

    pub fn composition(&self) -> &[CompositionSlice] {
        &self.composition
    }

    pub fn rows(&self) -> &[DetailRow] {
        &self.rows
    }

    pub fn applied_filters(&self) -> &Filters {
        &self.applied_filters
    }
}
