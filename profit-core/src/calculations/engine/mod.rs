//! The financial simulation engine.
//!
//! Each calculator covers one statement of the simulator; [`FinancialEngine`]
//! runs them together over a single input snapshot.

pub mod baseline;
pub mod config;
pub mod financial;
pub mod health;
pub mod provisions;
pub mod simulation;

pub use baseline::{BaselineCalculator, BaselineResults};
pub use config::{CapitalCostBase, EngineConfig, EngineConfigError, HealthThresholds, PayrollCharges};
pub use financial::{DerivedResults, FinancialEngine};
pub use health::{HealthCalculator, HealthResults, MarginHealth};
pub use provisions::{ProvisionCalculator, ProvisionResults};
pub use simulation::{SimulationCalculator, SimulationResults};
