// Infrastructure layer - Configuration and production adapters
pub mod config;
pub mod random;
pub mod system_clock;
