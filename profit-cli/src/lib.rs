//! Command-line front end of the profit simulator.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod utils;

pub use cli::Cli;
