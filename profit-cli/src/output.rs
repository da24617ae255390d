//! Plain-text rendering of reports for the terminal.

use std::fmt::Write;

use profit_core::calculations::common::{round_half_up, round_percentage};
use profit_core::calculations::{HealthResults, SimulationResults};
use profit_core::{DerivedResults, Report, ReportKind, SimulationInputs};
use rust_decimal::Decimal;

const LABEL_WIDTH: usize = 26;
const VALUE_WIDTH: usize = 14;
const PCT_WIDTH: usize = 9;

fn money(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

fn pct(value: Decimal) -> String {
    format!("{:.1}", round_percentage(value))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Renders a report as an aligned table under its title.
pub fn render_report(report: &Report) -> String {
    let with_change = report.kind == ReportKind::Simulated;
    let mut out = String::new();

    let _ = writeln!(out, "{}", report.kind.title());
    let _ = write!(
        out,
        "{:<LABEL_WIDTH$}{:>VALUE_WIDTH$}{:>PCT_WIDTH$}",
        "", "Monthly", "% Rev"
    );
    if with_change {
        let _ = write!(out, "{:>PCT_WIDTH$}", "Chg %");
    }
    out.push('\n');

    for row in &report.rows {
        let _ = write!(
            out,
            "{:<LABEL_WIDTH$}{:>VALUE_WIDTH$}{:>PCT_WIDTH$}",
            row.label,
            money(row.monthly_value),
            pct(row.percent_of_revenue)
        );
        if let Some(change) = row.change_pct {
            let _ = write!(out, "{:>PCT_WIDTH$}", pct(change));
        }
        out.push('\n');
    }
    out
}

/// One line per driver with its isolated effect on operating profit.
pub fn render_impacts(simulation: &SimulationResults) -> String {
    let mut out = String::from("Driver impact on operating profit\n");
    for (label, value) in [
        ("Revenue", simulation.impact_revenue),
        ("Variable costs", simulation.impact_variable_costs),
        ("Fixed expenses", simulation.impact_fixed_expenses),
    ] {
        let _ = writeln!(out, "{label:<LABEL_WIDTH$}{:>VALUE_WIDTH$}", money(value));
    }
    out
}

pub fn render_health(
    health: &HealthResults,
    ideal_margin_pct: Decimal,
) -> String {
    format!(
        "Margin health: {} (operating margin {}% vs ideal {}%, score {}/10) \
         safety: {}, efficiency: {}, trend: {}\n",
        health.margin_health.label(),
        pct(health.operating_margin_pct),
        pct(ideal_margin_pct),
        pct(health.health_score),
        yes_no(health.safety),
        yes_no(health.efficiency),
        yes_no(health.trend),
    )
}

/// Everything printed for one scenario.
pub fn render_scenario(
    name: &str,
    results: &DerivedResults,
    inputs: &SimulationInputs,
) -> String {
    let mut out = format!("== {name} ==\n\n");
    out.push_str(&render_report(&Report::baseline(results, inputs)));
    out.push('\n');
    out.push_str(&render_report(&Report::simulated(results, inputs)));
    out.push('\n');
    out.push_str(&render_impacts(&results.simulation));
    out.push('\n');
    out.push_str(&render_health(&results.health, inputs.ideal_margin_pct));
    out
}
