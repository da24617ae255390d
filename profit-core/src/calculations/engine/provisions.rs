//! Provisions, depreciation and cost of capital.
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Payroll provision: payroll base × composite charge rate |
//! | 2    | Vehicle cost |
//! | 3    | Service warranty expense |
//! | 4    | Total provisions (Line 1 + Line 2 + Line 3) |
//! | 5    | Fixed asset depreciation: value × annual % / 100 / 12 |
//! | 6    | Vehicle depreciation: investment × annual % / 100 / 12 |
//! | 7    | Total depreciation (Line 5 + Line 6) |
//! | 8    | Capital cost: base × reference rate % / 100 / 12 |
//! | 9    | Final result: operating profit − Line 4 − Line 7 − Line 8 |
//!
//! The capital-cost base is either `invested_capital` alone or the sum of
//! invested capital, vehicle investment and fixed asset value, depending on
//! [`CapitalCostBase`]. No input is validated; a negative asset value yields a
//! negative depreciation.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use profit_core::SimulationInputs;
//! use profit_core::calculations::{EngineConfig, ProvisionCalculator};
//!
//! let config = EngineConfig::default();
//! let calculator = ProvisionCalculator::new(&config);
//! let result = calculator.calculate(&SimulationInputs::default(), dec!(7000));
//!
//! assert_eq!(result.total_provisions, dec!(8344));
//! assert_eq!(result.capital_cost, dec!(10000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::SimulationInputs;
use crate::calculations::common::{monthly_charge, or_zero};

use super::config::{CapitalCostBase, EngineConfig};

/// Result of the provisions, depreciation and capital-cost calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionResults {
    pub payroll_provision: Decimal,
    pub total_provisions: Decimal,

    pub fixed_asset_depreciation: Decimal,
    pub vehicle_depreciation: Decimal,
    pub total_depreciation: Decimal,

    /// The balance the reference rate was applied to.
    pub capital_cost_base: Decimal,
    pub capital_cost: Decimal,

    /// Operating profit after provisions, depreciation and capital cost.
    pub final_result: Decimal,
}

/// Calculator for provisions, depreciation and capital cost.
#[derive(Debug, Clone)]
pub struct ProvisionCalculator<'a> {
    config: &'a EngineConfig,
}

impl<'a> ProvisionCalculator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Calculates every line, deducting the totals from `operating_profit`.
    pub fn calculate(
        &self,
        inputs: &SimulationInputs,
        operating_profit: Decimal,
    ) -> ProvisionResults {
        let payroll_provision = self.payroll_provision(inputs.payroll_base);
        let total_provisions = sum(&[
            payroll_provision,
            inputs.vehicle_cost,
            inputs.service_warranty_expense,
        ]);

        let fixed_asset_depreciation =
            monthly_charge(inputs.fixed_asset_value, inputs.fixed_asset_depreciation_pct);
        let vehicle_depreciation =
            monthly_charge(inputs.vehicle_investment, inputs.vehicle_depreciation_pct);
        let total_depreciation = sum(&[fixed_asset_depreciation, vehicle_depreciation]);

        let capital_cost_base = self.capital_cost_base(inputs);
        let capital_cost = monthly_charge(capital_cost_base, inputs.reference_rate_pct);

        let final_result = self.final_result(
            operating_profit,
            total_provisions,
            total_depreciation,
            capital_cost,
        );

        ProvisionResults {
            payroll_provision,
            total_provisions,
            fixed_asset_depreciation,
            vehicle_depreciation,
            total_depreciation,
            capital_cost_base,
            capital_cost,
            final_result,
        }
    }

    /// Line 1.
    fn payroll_provision(
        &self,
        payroll_base: Decimal,
    ) -> Decimal {
        or_zero(payroll_base.checked_mul(self.config.payroll_charges.composite_rate()))
    }

    fn capital_cost_base(
        &self,
        inputs: &SimulationInputs,
    ) -> Decimal {
        match self.config.capital_cost_base {
            CapitalCostBase::InvestedCapital => inputs.invested_capital,
            CapitalCostBase::AllAssets => sum(&[
                inputs.invested_capital,
                inputs.vehicle_investment,
                inputs.fixed_asset_value,
            ]),
        }
    }

    /// Line 9.
    fn final_result(
        &self,
        operating_profit: Decimal,
        total_provisions: Decimal,
        total_depreciation: Decimal,
        capital_cost: Decimal,
    ) -> Decimal {
        let deductions = sum(&[total_provisions, total_depreciation, capital_cost]);
        or_zero(operating_profit.checked_sub(deductions))
    }
}

fn sum(values: &[Decimal]) -> Decimal {
    values
        .iter()
        .fold(Decimal::ZERO, |acc, v| or_zero(acc.checked_add(*v)))
}
