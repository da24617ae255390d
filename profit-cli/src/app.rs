use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use profit_core::{FinancialEngine, Report};
use profit_data::{ReportWriter, Scenario, ScenarioLoader};
use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::output;

const DEFAULT_SCENARIO: &str = "current";

/// Loads the configuration named by `--config`, or the defaults.
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display())),
        None => Ok(AppConfig::default()),
    }
}

/// Builds the scenarios to run: defaults, then `[inputs]`, then the scenario
/// CSV rows, then `--reset`, then every `--set`.
pub fn build_scenarios(
    cli: &Cli,
    config: &AppConfig,
) -> Result<Vec<Scenario>> {
    let base = config.base_inputs();

    let mut scenarios = match &cli.scenarios {
        Some(path) => ScenarioLoader::load_file_with_base(path, &base)
            .with_context(|| format!("failed to load scenarios '{}'", path.display()))?,
        None => vec![Scenario {
            name: DEFAULT_SCENARIO.to_string(),
            inputs: base,
        }],
    };

    for scenario in &mut scenarios {
        cli.apply_overrides(&mut scenario.inputs);
    }
    Ok(scenarios)
}

/// Export path for one scenario. A single scenario writes to `export`
/// itself; several write `<stem>-<scenario>.csv` beside it.
pub fn export_path(
    export: &Path,
    scenario: &str,
    multiple: bool,
) -> PathBuf {
    if !multiple {
        return export.to_path_buf();
    }
    let stem = export
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let safe_name: String = scenario
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    export.with_file_name(format!("{stem}-{safe_name}.csv"))
}

/// Export paths for every scenario, in order. Fails when two scenarios
/// would write the same file.
pub fn export_paths(
    export: &Path,
    scenarios: &[Scenario],
) -> Result<Vec<PathBuf>> {
    let multiple = scenarios.len() > 1;
    let mut paths: Vec<PathBuf> = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let path = export_path(export, &scenario.name, multiple);
        if let Some(prev) = paths.iter().position(|p| *p == path) {
            anyhow::bail!(
                "scenarios '{}' and '{}' would both export to '{}'",
                scenarios[prev].name,
                scenario.name,
                path.display()
            );
        }
        paths.push(path);
    }
    Ok(paths)
}

/// Runs every scenario, writing the tables to `out`.
pub fn run_with<W: Write>(
    cli: &Cli,
    out: &mut W,
) -> Result<()> {
    let config = load_config(cli)?;
    let scenarios = build_scenarios(cli, &config)?;
    if scenarios.is_empty() {
        warn!("scenario file has no rows, nothing to compute");
        return Ok(());
    }

    let exports = match &cli.export {
        Some(export) => Some(export_paths(export, &scenarios)?),
        None => None,
    };
    let engine = FinancialEngine::new(config.engine);

    for (idx, scenario) in scenarios.iter().enumerate() {
        debug!(scenario = %scenario.name, "running scenario");
        let results = engine.calculate(&scenario.inputs);

        if idx > 0 {
            writeln!(out)?;
        }
        write!(
            out,
            "{}",
            output::render_scenario(&scenario.name, &results, &scenario.inputs)
        )?;

        if let Some(paths) = &exports {
            let path = &paths[idx];
            let report = if cli.simulated {
                Report::simulated(&results, &scenario.inputs)
            } else {
                Report::baseline(&results, &scenario.inputs)
            };
            ReportWriter::write_file(path, &report)
                .with_context(|| format!("failed to export '{}'", path.display()))?;
            info!(path = %path.display(), scenario = %scenario.name, "report exported");
        }
    }

    Ok(())
}

pub fn run(cli: &Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(cli, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // export_path tests
    // =========================================================================

    #[test]
    fn export_path_single_scenario_is_unchanged() {
        let path = export_path(Path::new("out/report.csv"), "current", false);

        assert_eq!(path, PathBuf::from("out/report.csv"));
    }

    #[test]
    fn export_path_multiple_scenarios_adds_suffix() {
        let path = export_path(Path::new("out/report.csv"), "price up/10%", true);

        assert_eq!(path, PathBuf::from("out/report-price_up_10_.csv"));
    }

    #[test]
    fn export_paths_rejects_colliding_names() {
        let scenarios = ["a b", "a_b"].map(|name| Scenario {
            name: name.to_string(),
            inputs: profit_core::SimulationInputs::default(),
        });

        let err = export_paths(Path::new("r.csv"), &scenarios).unwrap_err();

        assert_eq!(
            err.to_string(),
            "scenarios 'a b' and 'a_b' would both export to 'r-a_b.csv'"
        );
    }

    // =========================================================================
    // build_scenarios tests
    // =========================================================================

    #[test]
    fn build_scenarios_without_file_yields_current() {
        let cli = Cli::parse_from(["profit-sim", "--set", "revenue=40000"]);

        let scenarios = build_scenarios(&cli, &AppConfig::default()).unwrap();

        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].name, "current");
        assert_eq!(scenarios[0].inputs.revenue, dec!(40000));
    }

    #[test]
    fn build_scenarios_layers_config_under_set() {
        let config = AppConfig::parse_str("[inputs]\nrevenue = 50000\ninvestments = 900\n").unwrap();
        let cli = Cli::parse_from(["profit-sim", "--set", "investments=100"]);

        let scenarios = build_scenarios(&cli, &config).unwrap();

        assert_eq!(scenarios[0].inputs.revenue, dec!(50000));
        assert_eq!(scenarios[0].inputs.investments, dec!(100));
    }

    #[test]
    fn build_scenarios_reset_all_drops_config_inputs() {
        let config = AppConfig::parse_str("[inputs]\nrevenue = 50000\n").unwrap();
        let cli = Cli::parse_from(["profit-sim", "--reset", "all"]);

        let scenarios = build_scenarios(&cli, &config).unwrap();

        assert_eq!(scenarios[0].inputs.revenue, dec!(30000));
    }
}
