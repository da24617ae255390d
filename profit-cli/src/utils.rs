use std::sync::LazyLock;

use profit_core::InputField;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Currency symbols, percent signs and whitespace.
static DECIMAL_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\$|\$|%|\s").expect("valid decimal noise pattern"));

/// `1,234,567.89`: comma groups of three, optional point decimals.
static COMMA_GROUPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("valid comma grouping pattern")
});

/// `1.234.567,89`: point groups of three, optional comma decimals.
static POINT_GROUPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(\.\d{3})+(,\d+)?$").expect("valid point grouping pattern")
});

const BRL_PREFIX: &str = "R$";

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    #[error("invalid decimal '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    /// Thousands separators in the wrong places, e.g. `R$ 12.5`.
    #[error("invalid digit grouping in '{0}'")]
    Grouping(String),
}

/// Error returned by [`parse_assignment`].
#[derive(Debug, Error)]
pub enum FieldAssignmentError {
    #[error("expected FIELD=VALUE, got '{0}'")]
    MissingEquals(String),

    #[error("unknown input field '{0}'")]
    UnknownField(String),

    #[error("bad value for '{field}': {source}")]
    InvalidValue {
        field: &'static str,
        #[source]
        source: ParseDecimalError,
    },
}

/// One `--set` override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAssignment {
    pub field: InputField,
    pub value: Decimal,
}

/// Whether `,` is the decimal separator: always after `R$`, when it comes
/// after the last `.`, or when it is the only separator and does not group
/// thousands.
fn uses_decimal_comma(
    original: &str,
    stripped: &str,
) -> bool {
    if original.contains(BRL_PREFIX) {
        return true;
    }
    match (stripped.rfind(','), stripped.rfind('.')) {
        (Some(comma), Some(point)) => comma > point,
        (Some(_), None) => !COMMA_GROUPED.is_match(stripped),
        _ => false,
    }
}

/// Strips noise and rewrites the number with `.` as the only separator.
fn normalize_decimal_input(s: &str) -> Result<String, ParseDecimalError> {
    let stripped = DECIMAL_NOISE.replace_all(s, "");
    let (group, decimal, grouped) = if uses_decimal_comma(s, &stripped) {
        ('.', ',', &POINT_GROUPED)
    } else {
        (',', '.', &COMMA_GROUPED)
    };
    if stripped.contains(group) && !grouped.is_match(&stripped) {
        return Err(ParseDecimalError::Grouping(s.to_string()));
    }
    Ok(stripped
        .chars()
        .filter(|&c| c != group)
        .map(|c| if c == decimal { '.' } else { c })
        .collect())
}

/// Parses a string into a [`Decimal`].
///
/// Accepts `"1,234.56"`, `"$1500"` and `"12.5%"`, as well as Brazilian
/// input such as `"R$ 1.234,56"` and `"12,5%"`. A lone comma followed by
/// exactly three digits (`"1,234"`) groups thousands.
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s).inspect_err(|e| {
        tracing::error!(input = %s, "{}", e);
    })?;
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses `field=value`, e.g. `revenue_change_pct=10`.
pub fn parse_assignment(s: &str) -> Result<FieldAssignment, FieldAssignmentError> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| FieldAssignmentError::MissingEquals(s.to_string()))?;
    let key = key.trim();
    let field =
        InputField::parse(key).ok_or_else(|| FieldAssignmentError::UnknownField(key.to_string()))?;
    let value = parse_decimal(raw).map_err(|source| FieldAssignmentError::InvalidValue {
        field: field.as_str(),
        source,
    })?;
    Ok(FieldAssignment { field, value })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // parse_decimal tests
    // =========================================================================

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_strips_currency_and_percent() {
        assert_eq!(parse_decimal("$1500").unwrap(), dec!(1500));
        assert_eq!(parse_decimal("12.5%").unwrap(), dec!(12.5));
        assert_eq!(parse_decimal("-20 %").unwrap(), dec!(-20));
    }

    #[test]
    fn parse_decimal_reads_brazilian_money() {
        assert_eq!(parse_decimal("R$ 1.234,56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("R$ 30.000,00").unwrap(), dec!(30000));
        assert_eq!(parse_decimal("R$ 1.000.000").unwrap(), dec!(1000000));
        assert_eq!(parse_decimal("R$ 2500").unwrap(), dec!(2500));
    }

    #[test]
    fn parse_decimal_reads_decimal_comma() {
        assert_eq!(parse_decimal("12,5%").unwrap(), dec!(12.5));
        assert_eq!(parse_decimal("1.234,5").unwrap(), dec!(1234.5));
        assert_eq!(parse_decimal("-0,75").unwrap(), dec!(-0.75));
    }

    #[test]
    fn parse_decimal_rejects_misplaced_grouping() {
        assert!(matches!(
            parse_decimal("R$ 12.5"),
            Err(ParseDecimalError::Grouping(_))
        ));
        assert!(matches!(
            parse_decimal("1,23.4"),
            Err(ParseDecimalError::Grouping(_))
        ));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("1.2.3").is_err());
    }

    // =========================================================================
    // parse_assignment tests
    // =========================================================================

    #[test]
    fn parse_assignment_reads_field_and_value() {
        let assignment = parse_assignment("revenue_change_pct=10").unwrap();

        assert_eq!(assignment.field, InputField::RevenueChangePct);
        assert_eq!(assignment.value, dec!(10));
    }

    #[test]
    fn parse_assignment_trims_key_and_value() {
        let assignment = parse_assignment(" revenue = 42,000 ").unwrap();

        assert_eq!(assignment.field, InputField::Revenue);
        assert_eq!(assignment.value, dec!(42000));
    }

    #[test]
    fn parse_assignment_without_equals() {
        let err = parse_assignment("revenue").unwrap_err();

        assert!(matches!(err, FieldAssignmentError::MissingEquals(_)));
    }

    #[test]
    fn parse_assignment_unknown_field() {
        let err = parse_assignment("profit=1").unwrap_err();

        assert_eq!(err.to_string(), "unknown input field 'profit'");
    }

    #[test]
    fn parse_assignment_bad_value() {
        let err = parse_assignment("investments=lots").unwrap_err();

        assert!(matches!(
            err,
            FieldAssignmentError::InvalidValue {
                field: "investments",
                ..
            }
        ));
    }
}
