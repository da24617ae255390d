//! CSV loader for simulation scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name; column order does not matter. Every column
//! is optional. A cell left empty (or a column left out) keeps the value of
//! the base inputs, [`SimulationInputs::default`] unless the caller passes
//! its own.
//!
//! | Column | Type | Notes |
//! |--------|------|-------|
//! | `scenario` | string | Name shown in output; defaults to `scenario-<row>` |
//! | `revenue`, `variable_costs`, `fixed_expenses`, `investments` | decimal | Basic flow |
//! | `revenue_change_pct`, `variable_costs_change_pct`, `fixed_expenses_change_pct` | decimal | What-if variations, in percent |
//! | `payroll_base`, `vehicle_cost`, `service_warranty_expense` | decimal | Provisions |
//! | `fixed_asset_value`, `fixed_asset_depreciation_pct`, `vehicle_investment`, `vehicle_depreciation_pct` | decimal | Depreciation |
//! | `invested_capital`, `reference_rate_pct` | decimal | Cost of capital |
//! | `ideal_margin_pct` | decimal | Health target |
//!
//! ### Example
//!
//! ```csv
//! scenario,revenue,variable_costs,fixed_expenses,revenue_change_pct
//! current,30000,5000,18000,
//! price-up,30000,5000,18000,10
//! ```

use std::io::Read;
use std::path::Path;

use profit_core::{InputField, SimulationInputs};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

const SCENARIO_COLUMN: &str = "scenario";

/// Errors that can occur while loading scenarios.
#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV is structurally invalid (ragged rows, bad encoding, ...).
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A header is neither `scenario` nor a known input field.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// The same column appears twice.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A cell could not be parsed as a decimal. `row` is 1-based, the header
    /// not counted.
    #[error("invalid value '{value}' for '{column}' on row {row}")]
    InvalidValue {
        column: &'static str,
        value: String,
        row: usize,
    },
}

/// One named set of inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub inputs: SimulationInputs,
}

#[derive(Debug, Clone, Copy)]
enum Column {
    Name,
    Field(InputField),
}

/// Loader for scenario CSV files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Parse scenarios from any reader. Rows are returned in file order.
    ///
    /// # Errors
    ///
    /// * [`ScenarioLoadError::Csv`] if the CSV is structurally invalid.
    /// * [`ScenarioLoadError::UnknownColumn`] / [`ScenarioLoadError::DuplicateColumn`]
    ///   for header problems.
    /// * [`ScenarioLoadError::InvalidValue`] if a non-empty cell is not a decimal.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Scenario>, ScenarioLoadError> {
        Self::parse_with_base(reader, &SimulationInputs::default())
    }

    /// Like [`ScenarioLoader::parse`], with every row starting from `base`.
    pub fn parse_with_base<R: Read>(
        reader: R,
        base: &SimulationInputs,
    ) -> Result<Vec<Scenario>, ScenarioLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let columns = Self::columns(csv_reader.headers()?)?;

        let mut scenarios = Vec::new();
        for (idx, record) in csv_reader.records().enumerate() {
            let record = record?;
            scenarios.push(Self::convert_record(&columns, &record, base, idx + 1)?);
        }

        info!(count = scenarios.len(), "loaded scenarios");
        Ok(scenarios)
    }

    /// Parse scenarios from a string.
    pub fn parse_str(input: &str) -> Result<Vec<Scenario>, ScenarioLoadError> {
        Self::parse(input.as_bytes())
    }

    /// Read a file from disk and delegate to [`ScenarioLoader::parse`].
    pub fn load_file(path: &Path) -> Result<Vec<Scenario>, ScenarioLoadError> {
        Self::load_file_with_base(path, &SimulationInputs::default())
    }

    pub fn load_file_with_base(
        path: &Path,
        base: &SimulationInputs,
    ) -> Result<Vec<Scenario>, ScenarioLoadError> {
        let file = std::fs::File::open(path).map_err(|source| ScenarioLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_with_base(file, base)
    }

    fn columns(headers: &csv::StringRecord) -> Result<Vec<Column>, ScenarioLoadError> {
        let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            if headers.iter().take(idx).any(|h| h == header) {
                return Err(ScenarioLoadError::DuplicateColumn(header.to_string()));
            }
            let column = if header == SCENARIO_COLUMN {
                Column::Name
            } else {
                InputField::parse(header)
                    .map(Column::Field)
                    .ok_or_else(|| ScenarioLoadError::UnknownColumn(header.to_string()))?
            };
            columns.push(column);
        }
        Ok(columns)
    }

    fn convert_record(
        columns: &[Column],
        record: &csv::StringRecord,
        base: &SimulationInputs,
        row_number: usize,
    ) -> Result<Scenario, ScenarioLoadError> {
        let mut name = None;
        let mut inputs = base.clone();

        for (column, cell) in columns.iter().zip(record.iter()) {
            if cell.is_empty() {
                continue;
            }
            match *column {
                Column::Name => name = Some(cell.to_string()),
                Column::Field(field) => {
                    let value = cell.parse::<Decimal>().map_err(|_| {
                        ScenarioLoadError::InvalidValue {
                            column: field.as_str(),
                            value: cell.to_string(),
                            row: row_number,
                        }
                    })?;
                    inputs.set(field, value);
                }
            }
        }

        Ok(Scenario {
            name: name.unwrap_or_else(|| format!("scenario-{row_number}")),
            inputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_CSV: &str = "\
revenue,variable_costs
42000,7000
";

    const NAMED_CSV: &str = "\
scenario, revenue , revenue_change_pct ,ideal_margin_pct
current,30000,,
price-up,30000,10,15
";

    #[test]
    fn parse_minimal_keeps_defaults() {
        let scenarios = ScenarioLoader::parse_str(MINIMAL_CSV).unwrap();

        assert_eq!(scenarios.len(), 1);
        let s = &scenarios[0];
        assert_eq!(s.name, "scenario-1");
        assert_eq!(s.inputs.revenue, dec!(42000));
        assert_eq!(s.inputs.variable_costs, dec!(7000));
        assert_eq!(s.inputs.fixed_expenses, dec!(18000));
        assert_eq!(s.inputs.invested_capital, dec!(1000000));
    }

    #[test]
    fn parse_trims_headers_and_skips_empty_cells() {
        let scenarios = ScenarioLoader::parse_str(NAMED_CSV).unwrap();

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].name, "current");
        assert_eq!(scenarios[0].inputs.revenue_change_pct, dec!(0));
        assert_eq!(scenarios[0].inputs.ideal_margin_pct, dec!(13));
        assert_eq!(scenarios[1].name, "price-up");
        assert_eq!(scenarios[1].inputs.revenue_change_pct, dec!(10));
        assert_eq!(scenarios[1].inputs.ideal_margin_pct, dec!(15));
    }

    #[test]
    fn parse_accepts_negative_values() {
        let csv = "fixed_expenses_change_pct,fixed_asset_value\n-120,-5000.50\n";

        let scenarios = ScenarioLoader::parse_str(csv).unwrap();

        assert_eq!(scenarios[0].inputs.fixed_expenses_change_pct, dec!(-120));
        assert_eq!(scenarios[0].inputs.fixed_asset_value, dec!(-5000.50));
    }

    #[test]
    fn parse_with_base_fills_empty_cells_from_base() {
        let base = SimulationInputs {
            fixed_expenses: dec!(9000),
            ..SimulationInputs::default()
        };

        let scenarios =
            ScenarioLoader::parse_with_base("revenue,fixed_expenses\n20000,\n".as_bytes(), &base)
                .unwrap();

        assert_eq!(scenarios[0].inputs.revenue, dec!(20000));
        assert_eq!(scenarios[0].inputs.fixed_expenses, dec!(9000));
    }

    #[test]
    fn parse_header_only_yields_no_scenarios() {
        let scenarios = ScenarioLoader::parse_str("scenario,revenue\n").unwrap();

        assert!(scenarios.is_empty());
    }

    #[test]
    fn parse_rejects_unknown_column() {
        let err = ScenarioLoader::parse_str("revenue,profit\n1,2\n").unwrap_err();

        assert!(matches!(err, ScenarioLoadError::UnknownColumn(ref c) if c == "profit"));
        assert_eq!(err.to_string(), "unknown column 'profit'");
    }

    #[test]
    fn parse_rejects_duplicate_column() {
        let err = ScenarioLoader::parse_str("revenue,revenue\n1,2\n").unwrap_err();

        assert!(matches!(err, ScenarioLoadError::DuplicateColumn(ref c) if c == "revenue"));
    }

    #[test]
    fn parse_reports_invalid_value_with_row() {
        let csv = "scenario,revenue\nok,100\nbad,12k\n";

        let err = ScenarioLoader::parse_str(csv).unwrap_err();

        match err {
            ScenarioLoadError::InvalidValue { column, value, row } => {
                assert_eq!(column, "revenue");
                assert_eq!(value, "12k");
                assert_eq!(row, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = ScenarioLoader::parse_str("revenue,investments\n1,2,3\n").unwrap_err();

        assert!(matches!(err, ScenarioLoadError::Csv(_)));
    }
}
