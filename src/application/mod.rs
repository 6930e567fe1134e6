// Application layer - Step pipeline, scheduling and the live driver
pub mod aggregate_source;
pub mod engine;
pub mod live_service;
pub mod scheduler;
pub mod snapshot_renderer;
pub mod wall_clock;
