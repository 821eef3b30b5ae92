mod args;
mod commands;
pub mod config;
pub mod format;
pub mod paginator;
pub mod views;

pub use args::{Cli, Commands};
pub use commands::run;
