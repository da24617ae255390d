use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::input_field::{InputField, InputGroup};

/// How the basic-flow fields are restored by a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResetMode {
    /// Restore the documented defaults.
    #[default]
    Defaults,
    /// Clear to zero.
    Zero,
}

/// The caller-owned snapshot of every figure the engine reads.
///
/// All monetary values are monthly figures in a single, unspecified currency.
/// Percentages are expressed in percent (`5` means 5%). No field is
/// validated: negative values are accepted and flow through the formulas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInputs {
    // Basic flow
    pub revenue: Decimal,
    pub variable_costs: Decimal,
    pub fixed_expenses: Decimal,
    pub investments: Decimal,

    // What-if variations
    pub revenue_change_pct: Decimal,
    pub variable_costs_change_pct: Decimal,
    pub fixed_expenses_change_pct: Decimal,

    // Provisioning
    pub payroll_base: Decimal,
    pub vehicle_cost: Decimal,
    pub service_warranty_expense: Decimal,

    // Depreciation
    pub fixed_asset_value: Decimal,
    pub fixed_asset_depreciation_pct: Decimal,
    pub vehicle_investment: Decimal,
    pub vehicle_depreciation_pct: Decimal,

    // Cost of capital
    pub invested_capital: Decimal,
    pub reference_rate_pct: Decimal,

    /// Target operating margin used by the health indicators.
    pub ideal_margin_pct: Decimal,
}

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            revenue: Decimal::from(30_000),
            variable_costs: Decimal::from(5_000),
            fixed_expenses: Decimal::from(18_000),
            investments: Decimal::ZERO,
            revenue_change_pct: Decimal::ZERO,
            variable_costs_change_pct: Decimal::ZERO,
            fixed_expenses_change_pct: Decimal::ZERO,
            payroll_base: Decimal::from(10_000),
            vehicle_cost: Decimal::from(2_000),
            service_warranty_expense: Decimal::from(1_600),
            fixed_asset_value: Decimal::from(100_000),
            fixed_asset_depreciation_pct: Decimal::TEN,
            vehicle_investment: Decimal::from(500_000),
            vehicle_depreciation_pct: Decimal::from(4),
            invested_capital: Decimal::from(1_000_000),
            reference_rate_pct: Decimal::from(12),
            ideal_margin_pct: Decimal::from(13),
        }
    }
}

impl SimulationInputs {
    /// Inputs with every field cleared to zero, except the ideal margin,
    /// which keeps its default.
    pub fn zeroed() -> Self {
        let mut inputs = Self::default();
        inputs.reset_all(ResetMode::Zero);
        inputs
    }

    /// Reads a single field.
    pub fn get(
        &self,
        field: InputField,
    ) -> Decimal {
        *self.slot(field)
    }

    /// Overwrites a single field.
    pub fn set(
        &mut self,
        field: InputField,
        value: Decimal,
    ) {
        *self.slot_mut(field) = value;
    }

    /// Restores revenue, variable costs, fixed expenses and investments.
    pub fn reset_basic_flow(
        &mut self,
        mode: ResetMode,
    ) {
        self.reset_group(InputGroup::BasicFlow, mode);
    }

    /// Clears the three what-if variations.
    pub fn reset_simulation(&mut self) {
        self.reset_group(InputGroup::Simulation, ResetMode::Zero);
    }

    /// Clears every provisioning, depreciation and cost-of-capital field.
    pub fn reset_provisions(&mut self) {
        self.reset_group(InputGroup::Provisions, ResetMode::Zero);
    }

    /// Resets every group. The basic flow follows `mode`; the variations and
    /// provisions are cleared. The ideal margin is left as is.
    pub fn reset_all(
        &mut self,
        mode: ResetMode,
    ) {
        self.reset_basic_flow(mode);
        self.reset_simulation();
        self.reset_provisions();
    }

    fn reset_group(
        &mut self,
        group: InputGroup,
        mode: ResetMode,
    ) {
        let defaults = Self::default();
        for field in InputField::ALL.into_iter().filter(|f| f.group() == group) {
            let value = match mode {
                ResetMode::Defaults => defaults.get(field),
                ResetMode::Zero => Decimal::ZERO,
            };
            self.set(field, value);
        }
    }

    fn slot(
        &self,
        field: InputField,
    ) -> &Decimal {
        match field {
            InputField::Revenue => &self.revenue,
            InputField::VariableCosts => &self.variable_costs,
            InputField::FixedExpenses => &self.fixed_expenses,
            InputField::Investments => &self.investments,
            InputField::RevenueChangePct => &self.revenue_change_pct,
            InputField::VariableCostsChangePct => &self.variable_costs_change_pct,
            InputField::FixedExpensesChangePct => &self.fixed_expenses_change_pct,
            InputField::PayrollBase => &self.payroll_base,
            InputField::VehicleCost => &self.vehicle_cost,
            InputField::ServiceWarrantyExpense => &self.service_warranty_expense,
            InputField::FixedAssetValue => &self.fixed_asset_value,
            InputField::FixedAssetDepreciationPct => &self.fixed_asset_depreciation_pct,
            InputField::VehicleInvestment => &self.vehicle_investment,
            InputField::VehicleDepreciationPct => &self.vehicle_depreciation_pct,
            InputField::InvestedCapital => &self.invested_capital,
            InputField::ReferenceRatePct => &self.reference_rate_pct,
            InputField::IdealMarginPct => &self.ideal_margin_pct,
        }
    }

    fn slot_mut(
        &mut self,
        field: InputField,
    ) -> &mut Decimal {
        match field {
            InputField::Revenue => &mut self.revenue,
            InputField::VariableCosts => &mut self.variable_costs,
            InputField::FixedExpenses => &mut self.fixed_expenses,
            InputField::Investments => &mut self.investments,
            InputField::RevenueChangePct => &mut self.revenue_change_pct,
            InputField::VariableCostsChangePct => &mut self.variable_costs_change_pct,
            InputField::FixedExpensesChangePct => &mut self.fixed_expenses_change_pct,
            InputField::PayrollBase => &mut self.payroll_base,
            InputField::VehicleCost => &mut self.vehicle_cost,
            InputField::ServiceWarrantyExpense => &mut self.service_warranty_expense,
            InputField::FixedAssetValue => &mut self.fixed_asset_value,
            InputField::FixedAssetDepreciationPct => &mut self.fixed_asset_depreciation_pct,
            InputField::VehicleInvestment => &mut self.vehicle_investment,
            InputField::VehicleDepreciationPct => &mut self.vehicle_depreciation_pct,
            InputField::InvestedCapital => &mut self.invested_capital,
            InputField::ReferenceRatePct => &mut self.reference_rate_pct,
            InputField::IdealMarginPct => &mut self.ideal_margin_pct,
        }
    }
}
