//! Preprocessing of rows before estimation.
//!
//! Two cumulative transforms are supported. Taking the [`cumulative_sum`] of a row of
//! per-condition values means that any downstream comparison is a comparison of cumulative
//! values (the "cumulative of ratio"). Alternatively, the per-condition values may be
//! reconstructed from their underlying numerators and divisors by [`ratio_of_cumulative`],
//! accumulating the numerators and divisors separately before taking their ratio.

use std::{fmt, str::FromStr};

use crate::row::{self, Row, Value};

/// A preprocessing transform.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Transform {
    /// Leave rows as they are.
    #[default]
    None,
    /// Replace each value by the running sum of values up to and including it.
    CumulativeOfRatio,
    /// Reconstruct values from accumulated numerators and divisors.
    ///
    /// Input cells for this transform are [`Triplet`]s rather than plain values.
    RatioOfCumulative,
}

impl Transform {
    /// Creates a transform from the two mutually exclusive cumulative flags.
    ///
    /// Returns `None` if both flags are set.
    pub fn from_flags(cumulative_of_ratio: bool, ratio_of_cumulative: bool) -> Option<Self> {
        match (cumulative_of_ratio, ratio_of_cumulative) {
            (false, false) => Some(Transform::None),
            (true, false) => Some(Transform::CumulativeOfRatio),
            (false, true) => Some(Transform::RatioOfCumulative),
            (true, true) => None,
        }
    }

    /// Parses and transforms a row from fields.
    pub fn apply<'a, I>(self, fields: I) -> Result<Row, ParseCellError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            Transform::None => Ok(Row::parse_fields(fields)?),
            Transform::CumulativeOfRatio => Ok(cumulative_sum(&Row::parse_fields(fields)?)),
            Transform::RatioOfCumulative => fields
                .into_iter()
                .map(Triplet::from_str)
                .collect::<Result<Vec<_>, _>>()
                .map(|triplets| ratio_of_cumulative(&triplets))
                .map_err(ParseCellError::from),
        }
    }
}

/// Returns the running sum of a row.
///
/// Missing values are absorbing: once a missing value is encountered, all subsequent values
/// are missing.
pub fn cumulative_sum(row: &Row) -> Row {
    row.iter()
        .scan(Some(0.0), |acc, &value| {
            *acc = acc.zip(value).map(|(acc, value)| acc + value);
            Some(*acc)
        })
        .collect()
}

/// Returns the ratio of accumulated numerators and divisors of a row of triplets.
///
/// At each position, the numerators and first divisors of all triplets up to and including
/// that position are summed, and the value is the summed numerator divided by the product of
/// the summed first divisor and the second divisor at that position. A value is missing if
/// either divisor is zero or missing, and once a value is missing, all subsequent values are
/// missing.
pub fn ratio_of_cumulative(triplets: &[Triplet]) -> Row {
    let mut numerator = 0.0;
    let mut divisor = 0.0;

    triplets
        .iter()
        .scan(Some(()), |valid, triplet| {
            let value = valid.and_then(|()| {
                let (num, div_a, div_b) = triplet.values()?;

                numerator += num;
                divisor += div_a;

                (divisor != 0.0 && div_b != 0.0).then(|| numerator / (divisor * div_b))
            });
            *valid = value.map(|_| ());

            Some(value)
        })
        .collect()
}

/// A cell consisting of a numerator and two divisors, written as three comma-separated values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triplet {
    /// The numerator.
    pub numerator: Value,
    /// The divisor that is accumulated across conditions.
    pub divisor_a: Value,
    /// The divisor that is applied per condition.
    pub divisor_b: Value,
}

impl Triplet {
    /// The separator between values in a triplet.
    pub const SEPARATOR: char = ',';

    /// Creates a new triplet.
    pub fn new(numerator: Value, divisor_a: Value, divisor_b: Value) -> Self {
        Self {
            numerator,
            divisor_a,
            divisor_b,
        }
    }

    fn values(&self) -> Option<(f64, f64, f64)> {
        Some((self.numerator?, self.divisor_a?, self.divisor_b?))
    }
}

impl From<(f64, f64, f64)> for Triplet {
    fn from((numerator, divisor_a, divisor_b): (f64, f64, f64)) -> Self {
        Self::new(Some(numerator), Some(divisor_a), Some(divisor_b))
    }
}

impl FromStr for Triplet {
    type Err = ParseTripletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = s.split(Self::SEPARATOR).map(row::parse_value);

        match (values.next(), values.next(), values.next(), values.next()) {
            (Some(Ok(numerator)), Some(Ok(divisor_a)), Some(Ok(divisor_b)), None) => {
                Ok(Self::new(numerator, divisor_a, divisor_b))
            }
            _ => Err(ParseTripletError(String::from(s))),
        }
    }
}

/// An error associated with parsing a triplet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseTripletError(String);

impl fmt::Display for ParseTripletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to parse '{}' as three '{}'-separated values",
            self.0,
            Triplet::SEPARATOR
        )
    }
}

impl std::error::Error for ParseTripletError {}

/// An error associated with parsing a cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseCellError {
    /// Error parsing a plain value.
    Value(row::ParseValueError),
    /// Error parsing a triplet.
    Triplet(ParseTripletError),
}

impl fmt::Display for ParseCellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCellError::Value(e) => write!(f, "{e}"),
            ParseCellError::Triplet(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseCellError {}

impl From<row::ParseValueError> for ParseCellError {
    fn from(e: row::ParseValueError) -> Self {
        Self::Value(e)
    }
}

impl From<ParseTripletError> for ParseCellError {
    fn from(e: ParseTripletError) -> Self {
        Self::Triplet(e)
    }
}
