// Live dashboard service - Single-writer driver around engine and scheduler
//
// One task owns the engine and the scheduler. Ticks and operator commands are
// linearized through its select loop, and consumers only ever see complete
// snapshots through the watch channel.
use crate::application::engine::DashboardEngine;
use crate::application::scheduler::{RefreshScheduler, SchedulerEvent, TickOutcome};
use crate::domain::filters::{FilterField, Filters};
use crate::domain::snapshot::DashboardSnapshot;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_stream::wrappers::WatchStream;

const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("dashboard engine is no longer running")]
    Closed,
}

#[derive(Debug, Clone)]
enum EngineCommand {
    ForceStep,
    ApplyFilters,
    UpdateFilter { field: FilterField, value: String },
    ResetFilters,
    SetAutoRefresh(bool),
    ToggleAutoRefresh,
    Shutdown,
}

/// Cloneable handle to the running engine task.
#[derive(Debug, Clone)]
pub struct LiveDashboard {
    commands: mpsc::Sender<EngineCommand>,
    snapshots: watch::Receiver<Arc<DashboardSnapshot>>,
}

impl LiveDashboard {
    /// Move the engine and scheduler into a driver task ticking every
    /// `tick_interval`.
    pub fn spawn(
        engine: DashboardEngine,
        scheduler: RefreshScheduler,
        draft: Filters,
        tick_interval: Duration,
    ) -> (Self, JoinHandle<()>) {
        let initial = engine.snapshot(scheduler.countdown(), scheduler.is_running(), &draft);
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(initial));
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);

        let driver = Driver {
            engine,
            scheduler,
            draft,
            snapshots: snapshot_tx,
        };
        let task = tokio::spawn(driver.run(command_rx, tick_interval));

        (
            Self {
                commands: command_tx,
                snapshots: snapshot_rx,
            },
            task,
        )
    }

    pub async fn force_step(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::ForceStep).await
    }

    /// Apply the current filter draft.
    pub async fn apply_filters(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::ApplyFilters).await
    }

    pub async fn update_filter(&self, field: FilterField, value: String) -> Result<(), EngineError> {
        self.send(EngineCommand::UpdateFilter { field, value }).await
    }

    pub async fn reset_filters(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::ResetFilters).await
    }

    pub async fn set_auto_refresh(&self, enabled: bool) -> Result<(), EngineError> {
        self.send(EngineCommand::SetAutoRefresh(enabled)).await
    }

    pub async fn toggle_auto_refresh(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::ToggleAutoRefresh).await
    }

    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Shutdown).await
    }

    pub fn latest(&self) -> Arc<DashboardSnapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardSnapshot>> {
        self.snapshots.clone()
    }

    /// Stream of snapshots, starting with the current one.
    pub fn updates(&self) -> WatchStream<Arc<DashboardSnapshot>> {
        WatchStream::new(self.subscribe())
    }

    async fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| EngineError::Closed)
    }
}

struct Driver {
    engine: DashboardEngine,
    scheduler: RefreshScheduler,
    draft: Filters,
    snapshots: watch::Sender<Arc<DashboardSnapshot>>,
}

impl Driver {
    async fn run(mut self, mut commands: mpsc::Receiver<EngineCommand>, tick_interval: Duration) {
        let mut ticker = time::interval_at(Instant::now() + tick_interval, tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(?tick_interval, running = self.scheduler.is_running(), "live dashboard started");

        loop {
            tokio::select! {
                // Commands win over a due tick, so a pause is never followed
                // by a stray step.
                biased;

                command = commands.recv() => {
                    let Some(command) = command else { break };

                    let was_running = self.scheduler.is_running();
                    if self.handle(command).is_break() {
                        break;
                    }
                    if !was_running && self.scheduler.is_running() {
                        ticker.reset();
                    }
                    self.publish();
                }
                _ = ticker.tick(), if self.scheduler.is_running() => {
                    match self.scheduler.tick(&mut self.engine) {
                        TickOutcome::Idle => {}
                        TickOutcome::Counting { remaining } => {
                            tracing::debug!(remaining, "tick");
                        }
                        TickOutcome::Fired(report) => {
                            tracing::debug!(kpi = ?report.kpi, "countdown expired");
                        }
                    }
                    self.publish();
                }
            }
        }

        tracing::info!(steps = self.engine.sequence(), "live dashboard stopped");
    }

    fn handle(&mut self, command: EngineCommand) -> ControlFlow<()> {
        match command {
            EngineCommand::ForceStep => {
                self.scheduler.force_step(&mut self.engine);
            }
            EngineCommand::ApplyFilters => {
                self.scheduler
                    .apply_filters(&mut self.engine, self.draft.clone());
            }
            EngineCommand::UpdateFilter { field, value } => {
                tracing::debug!(?field, %value, "filter draft updated");
                self.draft.set(field, value);
            }
            EngineCommand::ResetFilters => {
                tracing::debug!("filter draft reset");
                self.draft = Filters::cleared();
            }
            EngineCommand::SetAutoRefresh(enabled) => {
                self.scheduler.set_auto_refresh(enabled);
            }
            EngineCommand::ToggleAutoRefresh => {
                self.scheduler.handle(SchedulerEvent::Toggle);
            }
            EngineCommand::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn publish(&self) {
        let snapshot = self.engine.snapshot(
            self.scheduler.countdown(),
            self.scheduler.is_running(),
            &self.draft,
        );
        self.snapshots.send_replace(Arc::new(snapshot));
    }
}
