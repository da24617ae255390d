//! Profit calculation modules.
//!
//! This module provides the calculation logic of the profit simulator,
//! organized by the statements the simulator derives from its inputs.

pub mod common;
pub mod engine;

pub use engine::{
    BaselineCalculator, BaselineResults, CapitalCostBase, DerivedResults, EngineConfig,
    EngineConfigError, FinancialEngine, HealthCalculator, HealthResults, HealthThresholds,
    MarginHealth, PayrollCharges, ProvisionCalculator, ProvisionResults, SimulationCalculator,
    SimulationResults,
};
