//! The financial engine: one entry point over every calculator.
//!
//! The engine owns nothing but its [`EngineConfig`]. Every call recomputes
//! from the [`SimulationInputs`] it is given, so callers can invoke it on each
//! input change and simply drop the previous snapshot.
//!
//! Degenerate arithmetic (a zero revenue, a zero denominator, an overflow) is
//! resolved to zero inside the calculators and never reported.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use profit_core::SimulationInputs;
//! use profit_core::calculations::{EngineConfig, FinancialEngine};
//!
//! let engine = FinancialEngine::new(EngineConfig::default());
//! let mut inputs = SimulationInputs::default();
//! inputs.revenue_change_pct = dec!(10);
//!
//! let results = engine.calculate(&inputs);
//!
//! assert_eq!(results.baseline.contribution_margin, dec!(25000));
//! assert_eq!(results.simulation.simulated_revenue, dec!(33000));
//! assert_eq!(results.provisions.capital_cost, dec!(10000));
//!
//! inputs.reset_all(profit_core::ResetMode::Zero);
//! let results = engine.calculate(&inputs);
//! assert_eq!(results.health.operating_margin_pct, dec!(0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::SimulationInputs;
use crate::calculations::common;

use super::baseline::{BaselineCalculator, BaselineResults};
use super::config::EngineConfig;
use super::health::{HealthCalculator, HealthResults};
use super::provisions::{ProvisionCalculator, ProvisionResults};
use super::simulation::{SimulationCalculator, SimulationResults};

/// Every derived figure for one input snapshot.
///
/// Serializes as a single flat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedResults {
    #[serde(flatten)]
    pub baseline: BaselineResults,
    #[serde(flatten)]
    pub simulation: SimulationResults,
    #[serde(flatten)]
    pub provisions: ProvisionResults,
    #[serde(flatten)]
    pub health: HealthResults,
}

/// Stateless calculation engine.
#[derive(Debug, Clone, Default)]
pub struct FinancialEngine {
    config: EngineConfig,
}

impl FinancialEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Contribution margin, LOAI, operating profit and break-even revenue.
    pub fn compute_baseline(
        &self,
        inputs: &SimulationInputs,
    ) -> BaselineResults {
        BaselineCalculator.calculate(inputs)
    }

    /// Simulated statement, profit delta and per-driver impacts.
    pub fn compute_simulation(
        &self,
        inputs: &SimulationInputs,
    ) -> SimulationResults {
        SimulationCalculator::default().calculate(inputs)
    }

    /// Provisions, depreciation, capital cost and the final result.
    pub fn compute_provisions_and_depreciation(
        &self,
        inputs: &SimulationInputs,
    ) -> ProvisionResults {
        let baseline = self.compute_baseline(inputs);
        ProvisionCalculator::new(&self.config).calculate(inputs, baseline.operating_profit)
    }

    /// Operating margin against the ideal margin.
    pub fn compute_health(
        &self,
        inputs: &SimulationInputs,
    ) -> HealthResults {
        let baseline = self.compute_baseline(inputs);
        self.health(inputs, &baseline)
    }

    /// `value` as a percentage of `revenue`; zero without revenue.
    pub fn percentage_of_revenue(
        &self,
        value: Decimal,
        revenue: Decimal,
    ) -> Decimal {
        common::percentage_of_revenue(value, revenue)
    }

    /// Computes the complete snapshot.
    pub fn calculate(
        &self,
        inputs: &SimulationInputs,
    ) -> DerivedResults {
        debug!(
            revenue = %inputs.revenue,
            revenue_change_pct = %inputs.revenue_change_pct,
            variable_costs_change_pct = %inputs.variable_costs_change_pct,
            fixed_expenses_change_pct = %inputs.fixed_expenses_change_pct,
            "computing derived results"
        );

        let baseline = self.compute_baseline(inputs);
        let simulation = self.compute_simulation(inputs);
        let provisions =
            ProvisionCalculator::new(&self.config).calculate(inputs, baseline.operating_profit);
        let health = self.health(inputs, &baseline);

        DerivedResults {
            baseline,
            simulation,
            provisions,
            health,
        }
    }

    fn health(
        &self,
        inputs: &SimulationInputs,
        baseline: &BaselineResults,
    ) -> HealthResults {
        HealthCalculator::new(&self.config.health).calculate(
            baseline.operating_profit,
            inputs.revenue,
            inputs.ideal_margin_pct,
        )
    }
}
