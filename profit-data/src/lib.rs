//! Scenario import and report export for the profit simulator.

pub mod report_writer;
pub mod scenario_loader;

pub use report_writer::{ReportWriteError, ReportWriter};
pub use scenario_loader::{Scenario, ScenarioLoadError, ScenarioLoader};
