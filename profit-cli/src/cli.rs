use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use profit_core::{ResetMode, SimulationInputs};

use crate::utils::{FieldAssignment, parse_assignment};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Monthly profit simulator.
///
/// Computes the period statement, a what-if simulation, provisions,
/// depreciation and cost of capital for one or more scenarios and prints
/// them as tables.
#[derive(Debug, Parser)]
#[command(name = "profit-sim", version)]
pub struct Cli {
    /// TOML file with `[engine]` settings and `[inputs]` overrides.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// CSV file with one scenario per row.
    #[arg(long, value_name = "CSV")]
    pub scenarios: Option<PathBuf>,

    /// Write the report as CSV. With several scenarios, one file per
    /// scenario is written next to this path as `<stem>-<scenario>.csv`.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the simulated report instead of the baseline one.
    #[arg(long)]
    pub simulated: bool,

    /// Override one input, e.g. `--set revenue_change_pct=10`. Repeatable.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<FieldAssignment>,

    /// Reset a group of inputs before `--set` is applied.
    #[arg(long, value_enum)]
    pub reset: Option<ResetTarget>,

    /// Log filter, e.g. `debug` or `profit_core=trace`. Overrides RUST_LOG.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Input group reset by `--reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResetTarget {
    /// Basic flow back to defaults.
    Basic,
    /// Basic flow cleared to zero.
    BasicZero,
    /// What-if variations cleared.
    Simulation,
    /// Provisions, depreciation and capital cleared.
    Provisions,
    /// Basic flow back to defaults, variations and provisions cleared.
    All,
}

impl ResetTarget {
    pub fn apply(
        self,
        inputs: &mut SimulationInputs,
    ) {
        match self {
            Self::Basic => inputs.reset_basic_flow(ResetMode::Defaults),
            Self::BasicZero => inputs.reset_basic_flow(ResetMode::Zero),
            Self::Simulation => inputs.reset_simulation(),
            Self::Provisions => inputs.reset_provisions(),
            Self::All => inputs.reset_all(ResetMode::Defaults),
        }
    }
}

impl Cli {
    /// Applies `--reset` then every `--set`, in command-line order.
    pub fn apply_overrides(
        &self,
        inputs: &mut SimulationInputs,
    ) {
        if let Some(target) = self.reset {
            target.apply(inputs);
        }
        for assignment in &self.assignments {
            inputs.set(assignment.field, assignment.value);
        }
    }
}
