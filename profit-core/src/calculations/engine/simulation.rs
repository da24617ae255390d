//! What-if simulation of percentage changes to the basic flow.
//!
//! Each of revenue, variable costs and fixed expenses is varied by its
//! `*_change_pct` through [`apply_pct`], which floors the varied figure at
//! zero. Investments are never varied. The simulated statement is then
//! recomputed through [`BaselineCalculator`], so the profit sign convention
//! is identical to the baseline.
//!
//! Per-driver impacts isolate one driver at a time: the operating profit
//! obtained by varying only that driver, minus the baseline operating profit.
//! A driver whose variation is exactly zero reports an impact of exactly zero.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use profit_core::SimulationInputs;
//! use profit_core::calculations::SimulationCalculator;
//!
//! let inputs = SimulationInputs {
//!     revenue_change_pct: dec!(10),
//!     ..SimulationInputs::default()
//! };
//! let result = SimulationCalculator::default().calculate(&inputs);
//!
//! assert_eq!(result.simulated_revenue, dec!(33000));
//! assert_eq!(result.simulated_operating_profit_before_investment, dec!(10000));
//! assert_eq!(result.impact_revenue, dec!(3000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::SimulationInputs;
use crate::calculations::common::{apply_pct, or_zero, percentage_change};

use super::baseline::BaselineCalculator;

/// Result of the what-if simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub simulated_revenue: Decimal,
    pub simulated_variable_costs: Decimal,
    pub simulated_fixed_expenses: Decimal,

    pub simulated_contribution_margin: Decimal,
    pub simulated_operating_profit_before_investment: Decimal,
    pub simulated_operating_profit: Decimal,

    /// Change of operating profit relative to the baseline, in percent of
    /// the baseline's magnitude. Zero when the baseline profit is zero.
    pub profit_delta_pct: Decimal,

    /// Operating-profit delta from varying revenue alone.
    pub impact_revenue: Decimal,

    /// Operating-profit delta from varying variable costs alone.
    pub impact_variable_costs: Decimal,

    /// Operating-profit delta from varying fixed expenses alone.
    pub impact_fixed_expenses: Decimal,
}

/// Calculator for the what-if simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationCalculator {
    baseline: BaselineCalculator,
}

impl SimulationCalculator {
    /// Calculates the simulated statement, the profit delta and the
    /// per-driver impacts.
    pub fn calculate(
        &self,
        inputs: &SimulationInputs,
    ) -> SimulationResults {
        let base_profit = self.baseline.profit_from(
            inputs.revenue,
            inputs.variable_costs,
            inputs.fixed_expenses,
            inputs.investments,
        );

        let simulated_revenue = apply_pct(inputs.revenue, inputs.revenue_change_pct);
        let simulated_variable_costs =
            apply_pct(inputs.variable_costs, inputs.variable_costs_change_pct);
        let simulated_fixed_expenses =
            apply_pct(inputs.fixed_expenses, inputs.fixed_expenses_change_pct);

        let simulated_contribution_margin = self
            .baseline
            .contribution_margin(simulated_revenue, simulated_variable_costs);
        let simulated_operating_profit_before_investment = self
            .baseline
            .operating_profit_before_investment(simulated_contribution_margin, simulated_fixed_expenses);
        let simulated_operating_profit = self
            .baseline
            .operating_profit(simulated_operating_profit_before_investment, inputs.investments);

        let impact_revenue = self.driver_impact(inputs.revenue_change_pct, base_profit, || {
            self.baseline.profit_from(
                simulated_revenue,
                inputs.variable_costs,
                inputs.fixed_expenses,
                inputs.investments,
            )
        });
        let impact_variable_costs =
            self.driver_impact(inputs.variable_costs_change_pct, base_profit, || {
                self.baseline.profit_from(
                    inputs.revenue,
                    simulated_variable_costs,
                    inputs.fixed_expenses,
                    inputs.investments,
                )
            });
        let impact_fixed_expenses =
            self.driver_impact(inputs.fixed_expenses_change_pct, base_profit, || {
                self.baseline.profit_from(
                    inputs.revenue,
                    inputs.variable_costs,
                    simulated_fixed_expenses,
                    inputs.investments,
                )
            });

        SimulationResults {
            simulated_revenue,
            simulated_variable_costs,
            simulated_fixed_expenses,
            simulated_contribution_margin,
            simulated_operating_profit_before_investment,
            simulated_operating_profit,
            profit_delta_pct: self.profit_delta_pct(simulated_operating_profit, base_profit),
            impact_revenue,
            impact_variable_costs,
            impact_fixed_expenses,
        }
    }

    /// `(simulated − base) / |base| × 100`, zero when `base` is zero.
    fn profit_delta_pct(
        &self,
        simulated_profit: Decimal,
        base_profit: Decimal,
    ) -> Decimal {
        percentage_change(simulated_profit, base_profit)
    }

    /// Profit delta attributable to one driver, forced to zero when the
    /// driver was not varied.
    fn driver_impact(
        &self,
        change_pct: Decimal,
        base_profit: Decimal,
        varied_profit: impl FnOnce() -> Decimal,
    ) -> Decimal {
        if change_pct.is_zero() {
            return Decimal::ZERO;
        }
        or_zero(varied_profit().checked_sub(base_profit))
    }
}
