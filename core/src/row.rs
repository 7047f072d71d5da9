//! Rows of per-condition values.

use std::{fmt, ops::Deref, str::FromStr};

/// The textual sentinel for a missing value.
pub const NA: &str = "NA";

/// A single per-condition value, where `None` marks a missing value.
pub type Value = Option<f64>;

/// Parses a single value, mapping the [`NA`] sentinel to `None`.
///
/// Only finite numbers are accepted, so that `nan` and `inf` are errors.
pub fn parse_value(s: &str) -> Result<Value, ParseValueError> {
    if s == NA {
        return Ok(None);
    }

    match f64::from_str(s) {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ParseValueError(String::from(s))),
    }
}

/// A displayable wrapper around a [`Value`] with a fixed precision.
#[derive(Clone, Copy, Debug)]
pub struct Formatted {
    value: Value,
    precision: usize,
}

impl Formatted {
    /// Creates a new formatted value.
    pub fn new(value: Value, precision: usize) -> Self {
        Self { value, precision }
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{v:.precision$}", precision = self.precision),
            None => f.write_str(NA),
        }
    }
}

/// An ordered row of values, one per condition.
///
/// The order of values corresponds to the order of conditions, and is preserved by all
/// operations on the row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row(pub Vec<Value>);

impl Row {
    /// Creates a new row from values.
    pub fn new<V>(values: V) -> Self
    where
        V: Into<Vec<Value>>,
    {
        Self(values.into())
    }

    /// Creates a new row without missing values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self(values.into_iter().map(Some).collect())
    }

    /// Returns the number of conditions in the row.
    pub fn conditions(&self) -> usize {
        self.0.len()
    }

    /// Returns the value of the first condition, or `None` if the row is empty or the value
    /// is missing.
    pub fn first(&self) -> Value {
        self.0.first().copied().flatten()
    }

    /// Returns the value of the last condition, or `None` if the row is empty or the value
    /// is missing.
    pub fn last(&self) -> Value {
        self.0.last().copied().flatten()
    }

    /// Parses a row from fields.
    pub fn parse_fields<'a, I>(fields: I) -> Result<Self, ParseValueError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        fields
            .into_iter()
            .map(parse_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl Deref for Row {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[Value; N]> for Row {
    fn from(values: [Value; N]) -> Self {
        Self(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Row {
    fn from(values: [f64; N]) -> Self {
        Self::from_values(values)
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self(iter.into_iter().collect())
    }
}

/// An error associated with parsing a value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseValueError(String);

impl fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse '{}' as number or '{NA}'", self.0)
    }
}

impl std::error::Error for ParseValueError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("1.5"), Ok(Some(1.5)));
        assert_eq!(parse_value("-2"), Ok(Some(-2.0)));
        assert_eq!(parse_value("NA"), Ok(None));
    }

    #[test]
    fn test_parse_value_sentinel_is_exact() {
        assert!(parse_value("na").is_err());
        assert!(parse_value(" NA").is_err());
        assert!(parse_value("").is_err());
    }

    #[test]
    fn test_parse_value_non_finite() {
        for token in ["nan", "NaN", "inf", "-inf", "infinity"] {
            assert_eq!(
                parse_value(token).unwrap_err().to_string(),
                format!("failed to parse '{token}' as number or 'NA'")
            );
        }
    }

    #[test]
    fn test_parse_fields() {
        assert_eq!(
            Row::parse_fields(["1", "NA", "3.25"]),
            Ok(Row::new([Some(1.0), None, Some(3.25)]))
        );

        assert_eq!(
            Row::parse_fields(["1", "two"]).unwrap_err().to_string(),
            "failed to parse 'two' as number or 'NA'"
        );
    }

    #[test]
    fn test_first_last() {
        let row = Row::new([None, Some(2.0), Some(3.0)]);
        assert_eq!(row.first(), None);
        assert_eq!(row.last(), Some(3.0));
        assert_eq!(row.conditions(), 3);

        assert_eq!(Row::default().first(), None);
    }

    #[test]
    fn test_formatted() {
        assert_eq!(Formatted::new(Some(0.2), 6).to_string(), "0.200000");
        assert_eq!(Formatted::new(Some(1.0 / 3.0), 2).to_string(), "0.33");
        assert_eq!(Formatted::new(None, 6).to_string(), "NA");
    }
}
