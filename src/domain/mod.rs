// Domain layer - Engine state types with no runtime dependencies
pub mod category;
pub mod clock;
pub mod composition;
pub mod detail;
pub mod filters;
pub mod kpi;
pub mod snapshot;
pub mod window;
