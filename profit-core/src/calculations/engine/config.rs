//! Configuration for the financial engine.
//!
//! The defaults reproduce the figures the simulator has always used; every
//! value can be overridden from a TOML file, and partial tables fall back to
//! the defaults field by field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::or_zero;

/// Errors reported by [`EngineConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineConfigError {
    /// A payroll charge component is negative.
    #[error("payroll charge '{name}' must be non-negative, got {value}")]
    NegativePayrollCharge { name: &'static str, value: Decimal },

    /// A health threshold is negative.
    #[error("health threshold '{name}' must be non-negative, got {value}")]
    NegativeHealthThreshold { name: &'static str, value: Decimal },

    /// Health thresholds must satisfy `attention <= ideal <= excellent`.
    #[error("health thresholds out of order: attention {attention}, ideal {ideal}, excellent {excellent}")]
    UnorderedHealthThresholds {
        attention: Decimal,
        ideal: Decimal,
        excellent: Decimal,
    },
}

/// Which balances the cost of capital is charged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalCostBase {
    /// `invested_capital` alone.
    #[default]
    InvestedCapital,
    /// `invested_capital + vehicle_investment + fixed_asset_value`.
    AllAssets,
}

/// The components of the payroll social-charge provision, as fractions of
/// the payroll base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollCharges {
    /// Monthly accrual for the 13th salary (1/12).
    pub thirteenth_salary_rate: Decimal,

    /// Monthly accrual for paid vacation plus the one-third bonus.
    pub vacation_rate: Decimal,

    /// Employer social charges on payroll.
    pub social_charges_rate: Decimal,
}

impl Default for PayrollCharges {
    fn default() -> Self {
        Self {
            thirteenth_salary_rate: Decimal::new(833, 4),
            vacation_rate: Decimal::new(1111, 4),
            social_charges_rate: Decimal::new(28, 2),
        }
    }
}

impl PayrollCharges {
    /// The composite rate applied to the payroll base.
    pub fn composite_rate(&self) -> Decimal {
        [self.vacation_rate, self.social_charges_rate]
            .into_iter()
            .fold(self.thirteenth_salary_rate, |acc, rate| or_zero(acc.checked_add(rate)))
    }
}

/// Ratio thresholds (actual margin / ideal margin) for the margin health
/// classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    pub excellent: Decimal,
    pub ideal: Decimal,
    pub attention: Decimal,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            excellent: Decimal::new(11, 1),
            ideal: Decimal::new(9, 1),
            attention: Decimal::new(7, 1),
        }
    }
}

/// Immutable settings shared by every calculator the engine runs.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use profit_core::calculations::{CapitalCostBase, EngineConfig};
///
/// let config: EngineConfig = toml::from_str(
///     r#"
///     capital_cost_base = "all_assets"
///
///     [payroll_charges]
///     social_charges_rate = "0.30"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.capital_cost_base, CapitalCostBase::AllAssets);
/// assert_eq!(config.payroll_charges.composite_rate(), dec!(0.4944));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub payroll_charges: PayrollCharges,
    pub capital_cost_base: CapitalCostBase,
    pub health: HealthThresholds,
}

impl EngineConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineConfigError`] if:
    /// - any payroll charge component is negative
    /// - any health threshold is negative
    /// - the health thresholds are not ordered `attention <= ideal <= excellent`
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        let charges = [
            ("thirteenth_salary_rate", self.payroll_charges.thirteenth_salary_rate),
            ("vacation_rate", self.payroll_charges.vacation_rate),
            ("social_charges_rate", self.payroll_charges.social_charges_rate),
        ];
        if let Some((name, value)) = charges.into_iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(EngineConfigError::NegativePayrollCharge { name, value });
        }

        let HealthThresholds {
            excellent,
            ideal,
            attention,
        } = self.health;
        let thresholds = [
            ("excellent", excellent),
            ("ideal", ideal),
            ("attention", attention),
        ];
        if let Some((name, value)) = thresholds.into_iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(EngineConfigError::NegativeHealthThreshold { name, value });
        }
        if attention > ideal || ideal > excellent {
            return Err(EngineConfigError::UnorderedHealthThresholds {
                attention,
                ideal,
                excellent,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_composite_rate_sums_components() {
        let config = EngineConfig::default();

        assert_eq!(config.payroll_charges.composite_rate(), dec!(0.4744));
    }

    #[test]
    fn default_capital_cost_base_is_invested_capital() {
        assert_eq!(EngineConfig::default().capital_cost_base, CapitalCostBase::InvestedCapital);
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_payroll_charge() {
        let mut config = EngineConfig::default();
        config.payroll_charges.vacation_rate = dec!(-0.1);

        assert_eq!(
            config.validate(),
            Err(EngineConfigError::NegativePayrollCharge {
                name: "vacation_rate",
                value: dec!(-0.1),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_health_threshold() {
        let mut config = EngineConfig::default();
        config.health.attention = dec!(-0.5);

        assert_eq!(
            config.validate(),
            Err(EngineConfigError::NegativeHealthThreshold {
                name: "attention",
                value: dec!(-0.5),
            })
        );
    }

    #[test]
    fn validate_rejects_unordered_thresholds() {
        let mut config = EngineConfig::default();
        config.health.ideal = dec!(1.5);

        assert!(matches!(
            config.validate(),
            Err(EngineConfigError::UnorderedHealthThresholds { .. })
        ));
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();

        assert_eq!(config, EngineConfig::default());
    }
}
