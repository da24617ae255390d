use serde::{Deserialize, Serialize};

/// The reset group an input field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputGroup {
    /// Revenue, variable costs, fixed expenses and investments.
    BasicFlow,
    /// The what-if percentage variations.
    Simulation,
    /// Provisioning, depreciation and cost-of-capital inputs.
    Provisions,
    /// Free-standing thresholds that no reset touches.
    Configuration,
}

/// Addresses a single field of [`SimulationInputs`](crate::SimulationInputs).
///
/// The string keys double as CSV column headers and TOML keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Revenue,
    VariableCosts,
    FixedExpenses,
    Investments,
    RevenueChangePct,
    VariableCostsChangePct,
    FixedExpensesChangePct,
    PayrollBase,
    VehicleCost,
    ServiceWarrantyExpense,
    FixedAssetValue,
    FixedAssetDepreciationPct,
    VehicleInvestment,
    VehicleDepreciationPct,
    InvestedCapital,
    ReferenceRatePct,
    IdealMarginPct,
}

impl InputField {
    /// Every field, in display order.
    pub const ALL: [InputField; 17] = [
        Self::Revenue,
        Self::VariableCosts,
        Self::FixedExpenses,
        Self::Investments,
        Self::RevenueChangePct,
        Self::VariableCostsChangePct,
        Self::FixedExpensesChangePct,
        Self::PayrollBase,
        Self::VehicleCost,
        Self::ServiceWarrantyExpense,
        Self::FixedAssetValue,
        Self::FixedAssetDepreciationPct,
        Self::VehicleInvestment,
        Self::VehicleDepreciationPct,
        Self::InvestedCapital,
        Self::ReferenceRatePct,
        Self::IdealMarginPct,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::VariableCosts => "variable_costs",
            Self::FixedExpenses => "fixed_expenses",
            Self::Investments => "investments",
            Self::RevenueChangePct => "revenue_change_pct",
            Self::VariableCostsChangePct => "variable_costs_change_pct",
            Self::FixedExpensesChangePct => "fixed_expenses_change_pct",
            Self::PayrollBase => "payroll_base",
            Self::VehicleCost => "vehicle_cost",
            Self::ServiceWarrantyExpense => "service_warranty_expense",
            Self::FixedAssetValue => "fixed_asset_value",
            Self::FixedAssetDepreciationPct => "fixed_asset_depreciation_pct",
            Self::VehicleInvestment => "vehicle_investment",
            Self::VehicleDepreciationPct => "vehicle_depreciation_pct",
            Self::InvestedCapital => "invested_capital",
            Self::ReferenceRatePct => "reference_rate_pct",
            Self::IdealMarginPct => "ideal_margin_pct",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == s)
    }

    pub fn group(&self) -> InputGroup {
        match self {
            Self::Revenue | Self::VariableCosts | Self::FixedExpenses | Self::Investments => {
                InputGroup::BasicFlow
            }
            Self::RevenueChangePct | Self::VariableCostsChangePct | Self::FixedExpensesChangePct => {
                InputGroup::Simulation
            }
            Self::IdealMarginPct => InputGroup::Configuration,
            _ => InputGroup::Provisions,
        }
    }
}

impl std::fmt::Display for InputField {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_every_key() {
        for field in InputField::ALL {
            assert_eq!(InputField::parse(field.as_str()), Some(field));
        }
    }

    #[test]
    fn parse_rejects_unknown_and_camel_case_keys() {
        assert_eq!(InputField::parse("revenueChangePct"), None);
        assert_eq!(InputField::parse(""), None);
    }

    #[test]
    fn serde_name_matches_key() {
        #[derive(Deserialize)]
        struct Wrapper {
            field: InputField,
        }

        let wrapper: Wrapper = toml::from_str("field = \"service_warranty_expense\"").unwrap();

        assert_eq!(wrapper.field, InputField::ServiceWarrantyExpense);
    }

    #[test]
    fn group_partitions_fields() {
        assert_eq!(InputField::Investments.group(), InputGroup::BasicFlow);
        assert_eq!(InputField::FixedExpensesChangePct.group(), InputGroup::Simulation);
        assert_eq!(InputField::ReferenceRatePct.group(), InputGroup::Provisions);
        assert_eq!(InputField::IdealMarginPct.group(), InputGroup::Configuration);

        let provisions = InputField::ALL
            .iter()
            .filter(|f| f.group() == InputGroup::Provisions)
            .count();
        assert_eq!(provisions, 9);
    }
}
