// Presentation layer - Terminal front end for the live engine
pub mod app_state;
pub mod commands;
pub mod console;
pub mod handlers;
