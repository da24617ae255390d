//! Tabular views over [`DerivedResults`].
//!
//! A report is a list of `[label, monthly value, % of revenue]` rows, the
//! shape the simulator shows on screen and exports. The simulated report adds
//! a change column against the matching baseline line.
//!
//! Values are full precision; call [`Report::rounded`] at the presentation
//! boundary.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::SimulationInputs;
use crate::calculations::DerivedResults;
use crate::calculations::common::{percentage_change, percentage_of_revenue, round_half_up, round_percentage};

/// Which view a report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Baseline,
    Simulated,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Baseline => "Period cash flow",
            Self::Simulated => "Cash flow after changes",
        }
    }
}

/// One line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub label: &'static str,
    pub monthly_value: Decimal,
    pub percent_of_revenue: Decimal,
    /// Change against the baseline line, simulated reports only.
    pub change_pct: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// The baseline statement followed by provisions, depreciation, capital
    /// cost and the final result, each against base revenue.
    pub fn baseline(
        results: &DerivedResults,
        inputs: &SimulationInputs,
    ) -> Self {
        let base = &results.baseline;
        let prov = &results.provisions;
        let lines = [
            ("Revenue", inputs.revenue),
            ("Variable costs", inputs.variable_costs),
            ("Contribution margin", base.contribution_margin),
            ("Fixed expenses", inputs.fixed_expenses),
            ("LOAI", base.operating_profit_before_investment),
            ("Investments", inputs.investments),
            ("Operating profit", base.operating_profit),
            ("Break-even revenue", base.break_even_revenue),
            ("Payroll provision", prov.payroll_provision),
            ("Vehicle cost", inputs.vehicle_cost),
            ("Service warranty", inputs.service_warranty_expense),
            ("Total provisions", prov.total_provisions),
            ("Fixed asset depreciation", prov.fixed_asset_depreciation),
            ("Vehicle depreciation", prov.vehicle_depreciation),
            ("Total depreciation", prov.total_depreciation),
            ("Capital cost", prov.capital_cost),
            ("Final result", prov.final_result),
        ];

        let rows = lines
            .into_iter()
            .map(|(label, value)| ReportRow {
                label,
                monthly_value: value,
                percent_of_revenue: percentage_of_revenue(value, inputs.revenue),
                change_pct: None,
            })
            .collect();

        Self {
            kind: ReportKind::Baseline,
            rows,
        }
    }

    /// The simulated statement against simulated revenue, with the change
    /// of each line relative to the baseline.
    pub fn simulated(
        results: &DerivedResults,
        inputs: &SimulationInputs,
    ) -> Self {
        let base = &results.baseline;
        let sim = &results.simulation;
        let lines = [
            ("Revenue", sim.simulated_revenue, inputs.revenue),
            ("Variable costs", sim.simulated_variable_costs, inputs.variable_costs),
            (
                "Contribution margin",
                sim.simulated_contribution_margin,
                base.contribution_margin,
            ),
            ("Fixed expenses", sim.simulated_fixed_expenses, inputs.fixed_expenses),
            (
                "LOAI",
                sim.simulated_operating_profit_before_investment,
                base.operating_profit_before_investment,
            ),
            ("Investments", inputs.investments, inputs.investments),
        ];

        let mut rows: Vec<ReportRow> = lines
            .into_iter()
            .map(|(label, value, previous)| ReportRow {
                label,
                monthly_value: value,
                percent_of_revenue: percentage_of_revenue(value, sim.simulated_revenue),
                change_pct: Some(percentage_change(value, previous)),
            })
            .collect();
        rows.push(ReportRow {
            label: "Operating profit",
            monthly_value: sim.simulated_operating_profit,
            percent_of_revenue: percentage_of_revenue(
                sim.simulated_operating_profit,
                sim.simulated_revenue,
            ),
            change_pct: Some(sim.profit_delta_pct),
        });

        Self {
            kind: ReportKind::Simulated,
            rows,
        }
    }

    /// Money to two places, percentages to one, both half away from zero.
    pub fn rounded(&self) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| ReportRow {
                label: row.label,
                monthly_value: round_half_up(row.monthly_value),
                percent_of_revenue: round_percentage(row.percent_of_revenue),
                change_pct: row.change_pct.map(round_percentage),
            })
            .collect();

        Self {
            kind: self.kind,
            rows,
        }
    }

    pub fn row(
        &self,
        label: &str,
    ) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.label == label)
    }
}
