// Refresh scheduler - Countdown state machine driving automatic steps
use crate::application::engine::{DashboardEngine, StepReport};
use crate::domain::clock::AdvanceMode;
use crate::domain::filters::Filters;

pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Paused,
}

/// Operator input that can move the scheduler between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    Enable,
    Disable,
    Toggle,
}

impl SchedulerState {
    pub fn on(self, event: SchedulerEvent) -> SchedulerState {
        match (self, event) {
            (_, SchedulerEvent::Enable) => SchedulerState::Running,
            (_, SchedulerEvent::Disable) => SchedulerState::Paused,
            (SchedulerState::Running, SchedulerEvent::Toggle) => SchedulerState::Paused,
            (SchedulerState::Paused, SchedulerEvent::Toggle) => SchedulerState::Running,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused; the tick was ignored.
    Idle,
    /// Countdown moved down to `remaining`.
    Counting { remaining: u32 },
    /// Countdown expired, an auto step ran and the countdown was reset.
    Fired(StepReport),
}

/// Owns only the timing contract. Every method that steps takes the engine
/// by `&mut`, so steps are serialized by whoever owns both.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    state: SchedulerState,
    period: u32,
    countdown: u32,
}

impl RefreshScheduler {
    pub fn new(period: u32, auto_refresh: bool) -> Self {
        let period = period.max(1);
        Self {
            state: if auto_refresh {
                SchedulerState::Running
            } else {
                SchedulerState::Paused
            },
            period,
            countdown: period,
        }
    }

    /// One second elapsed.
    pub fn tick(&mut self, engine: &mut DashboardEngine) -> TickOutcome {
        if self.state == SchedulerState::Paused {
            return TickOutcome::Idle;
        }

        if self.countdown <= 1 {
            let report = engine.step(AdvanceMode::Auto);
            self.countdown = self.period;
            tracing::info!(
                sequence = report.sequence,
                mode = ?report.mode,
                label = %report.label,
                "auto refresh step"
            );
            TickOutcome::Fired(report)
        } else {
            self.countdown -= 1;
            TickOutcome::Counting {
                remaining: self.countdown,
            }
        }
    }

    /// Manual one-minute step. Leaves the countdown alone.
    pub fn force_step(&self, engine: &mut DashboardEngine) -> StepReport {
        let report = engine.step(AdvanceMode::Manual);
        tracing::info!(sequence = report.sequence, label = %report.label, "manual step");
        report
    }

    /// Filter apply steps in auto mode, unlike the manual step button.
    pub fn apply_filters(&self, engine: &mut DashboardEngine, filters: Filters) -> StepReport {
        engine.apply_filters(filters)
    }

    pub fn handle(&mut self, event: SchedulerEvent) -> SchedulerState {
        let next = self.state.on(event);
        if next != self.state {
            tracing::info!(from = ?self.state, to = ?next, countdown = self.countdown, "auto refresh toggled");
        }
        self.state = next;
        next
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) -> SchedulerState {
        self.handle(if enabled {
            SchedulerEvent::Enable
        } else {
            SchedulerEvent::Disable
        })
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Countdown as shown to consumers; hidden while paused.
    pub fn countdown(&self) -> Option<u32> {
        match self.state {
            SchedulerState::Running => Some(self.countdown),
            SchedulerState::Paused => None,
        }
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECONDS, true)
    }
}
