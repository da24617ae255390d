//! Baseline cash-flow statement for the period.
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Revenue |
//! | 2    | Variable costs |
//! | 3    | Contribution margin (Line 1 − Line 2) |
//! | 4    | Fixed expenses |
//! | 5    | Operating profit before investments, LOAI (Line 3 − Line 4) |
//! | 6    | Investments |
//! | 7    | Operating profit (Line 5 − Line 6) |
//! | 8    | Break-even revenue: (Line 4 + Line 6) / (1 − Line 2 / Line 1) |
//!
//! Investments are treated as a cash outflow: they are subtracted from LOAI.
//! The simulation reuses [`BaselineCalculator::operating_profit`] so the same
//! convention holds for simulated figures.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use profit_core::SimulationInputs;
//! use profit_core::calculations::BaselineCalculator;
//!
//! let inputs = SimulationInputs::default();
//! let result = BaselineCalculator.calculate(&inputs);
//!
//! assert_eq!(result.contribution_margin, dec!(25000));
//! assert_eq!(result.operating_profit_before_investment, dec!(7000));
//! assert_eq!(result.break_even_revenue, dec!(21600));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::SimulationInputs;
use crate::calculations::common::{or_zero, ratio};

/// Result of the baseline statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineResults {
    /// Revenue minus variable costs.
    pub contribution_margin: Decimal,

    /// Contribution margin minus fixed expenses (LOAI).
    pub operating_profit_before_investment: Decimal,

    /// LOAI minus investments.
    pub operating_profit: Decimal,

    /// Revenue at which fixed expenses and investments are exactly covered.
    ///
    /// Zero when revenue is zero or variable costs consume all of it.
    pub break_even_revenue: Decimal,
}

/// Calculator for the baseline statement. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineCalculator;

impl BaselineCalculator {
    /// Calculates every baseline line from the basic-flow inputs.
    pub fn calculate(
        &self,
        inputs: &SimulationInputs,
    ) -> BaselineResults {
        let contribution_margin = self.contribution_margin(inputs.revenue, inputs.variable_costs);
        let operating_profit_before_investment =
            self.operating_profit_before_investment(contribution_margin, inputs.fixed_expenses);
        let operating_profit =
            self.operating_profit(operating_profit_before_investment, inputs.investments);
        let break_even_revenue = self.break_even_revenue(
            inputs.revenue,
            inputs.variable_costs,
            inputs.fixed_expenses,
            inputs.investments,
        );

        BaselineResults {
            contribution_margin,
            operating_profit_before_investment,
            operating_profit,
            break_even_revenue,
        }
    }

    /// Operating profit straight from the four basic-flow figures.
    ///
    /// Used by the simulation to evaluate varied figures through the same
    /// chain of lines.
    pub(crate) fn profit_from(
        &self,
        revenue: Decimal,
        variable_costs: Decimal,
        fixed_expenses: Decimal,
        investments: Decimal,
    ) -> Decimal {
        let margin = self.contribution_margin(revenue, variable_costs);
        let loai = self.operating_profit_before_investment(margin, fixed_expenses);
        self.operating_profit(loai, investments)
    }

    /// Line 3.
    pub(crate) fn contribution_margin(
        &self,
        revenue: Decimal,
        variable_costs: Decimal,
    ) -> Decimal {
        or_zero(revenue.checked_sub(variable_costs))
    }

    /// Line 5.
    pub(crate) fn operating_profit_before_investment(
        &self,
        contribution_margin: Decimal,
        fixed_expenses: Decimal,
    ) -> Decimal {
        or_zero(contribution_margin.checked_sub(fixed_expenses))
    }

    /// Line 7.
    pub(crate) fn operating_profit(
        &self,
        operating_profit_before_investment: Decimal,
        investments: Decimal,
    ) -> Decimal {
        or_zero(operating_profit_before_investment.checked_sub(investments))
    }

    /// Line 8, evaluated as `(F + I) × R / (R − V)`.
    ///
    /// This is algebraically `(F + I) / (1 − V/R)` but avoids rounding the
    /// inner ratio before the outer division.
    fn break_even_revenue(
        &self,
        revenue: Decimal,
        variable_costs: Decimal,
        fixed_expenses: Decimal,
        investments: Decimal,
    ) -> Decimal {
        if revenue.is_zero() {
            return Decimal::ZERO;
        }
        let to_cover = or_zero(fixed_expenses.checked_add(investments));
        let scaled = or_zero(to_cover.checked_mul(revenue));
        ratio(scaled, or_zero(revenue.checked_sub(variable_costs)))
    }
}
