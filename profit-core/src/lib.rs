pub mod calculations;
pub mod models;
pub mod report;

pub use calculations::{DerivedResults, EngineConfig, FinancialEngine};
pub use models::*;
pub use report::{Report, ReportKind, ReportRow};
