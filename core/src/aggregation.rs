//! Aggregation of pairwise comparisons across a row.

use std::fmt;

use crate::{
    row::{Row, Value},
    Operator,
};

/// A strategy for aggregating pairwise comparisons across the conditions of a row.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Aggregation {
    /// Compare the last condition against the first.
    TwoPoint,
    /// Compare each condition after the first against the first, and sum the comparisons.
    Fixed,
    /// Compare each condition after the first against the one preceding it, and sum the
    /// comparisons.
    Global,
}

impl Aggregation {
    /// All aggregations.
    pub const VARIANTS: [Aggregation; 3] = [
        Aggregation::TwoPoint,
        Aggregation::Fixed,
        Aggregation::Global,
    ];

    /// Aggregates a row using the provided operator.
    ///
    /// A missing result means no estimate is available for the row.
    pub fn aggregate(self, operator: Operator, row: &Row) -> Value {
        match self {
            Aggregation::TwoPoint => two_point(operator, row),
            Aggregation::Fixed => fixed(operator, row),
            Aggregation::Global => global(operator, row),
        }
    }

    /// Returns the name of the aggregation.
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::TwoPoint => "two_point",
            Aggregation::Fixed => "fixed",
            Aggregation::Global => "global",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn two_point(operator: Operator, row: &Row) -> Value {
    operator.estimate(row.last(), row.first())
}

fn fixed(operator: Operator, row: &Row) -> Value {
    let reference = row.first()?;

    accumulate(
        row.iter()
            .skip(1)
            .map(|&value| operator.estimate(value, Some(reference))),
    )
}

fn global(operator: Operator, row: &Row) -> Value {
    accumulate(
        row.windows(2)
            .map(|pair| operator.estimate(pair[1], pair[0])),
    )
}

/// Sums terms, stopping at and returning the first missing term.
fn accumulate<I>(terms: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    terms
        .into_iter()
        .try_fold(0.0, |total, term| term.map(|term| total + term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_stops_at_missing() {
        assert_eq!(accumulate([Some(1.0), Some(2.0)]), Some(3.0));
        assert_eq!(accumulate([Some(1.0), None, Some(2.0)]), None);
        assert_eq!(accumulate(Vec::new()), Some(0.0));
    }

    #[test]
    fn test_two_point_ignores_interior() {
        let row = Row::from([1., 99., 99., 4.]);
        assert_eq!(Aggregation::TwoPoint.aggregate(Operator::Ratio, &row), Some(4.0));

        let row = Row::new([Some(1.0), None, Some(4.0)]);
        assert_eq!(Aggregation::TwoPoint.aggregate(Operator::Diff, &row), Some(3.0));
    }

    #[test]
    fn test_two_point_missing_endpoint() {
        let row = Row::new([Some(1.0), Some(2.0), None]);
        assert_eq!(Aggregation::TwoPoint.aggregate(Operator::Diff, &row), None);
    }

    #[test]
    fn test_fixed_missing_reference() {
        for operator in Operator::VARIANTS {
            let row = Row::new([None, Some(-1.0), Some(-2.0)]);
            assert_eq!(Aggregation::Fixed.aggregate(operator, &row), None);
        }
    }

    #[test]
    fn test_fixed_stops_at_first_missing_term() {
        let row = Row::new([Some(2.0), Some(4.0), None, Some(8.0)]);
        assert_eq!(Aggregation::Fixed.aggregate(Operator::Diff, &row), None);
    }

    #[test]
    fn test_fixed_diff() {
        let row = Row::from([2., 4., 8.]);
        assert_eq!(Aggregation::Fixed.aggregate(Operator::Diff, &row), Some(8.0));
    }

    #[test]
    fn test_fixed_zero_reference_ratio() {
        let row = Row::from([0., 4., 8.]);
        assert_eq!(Aggregation::Fixed.aggregate(Operator::Ratio, &row), None);
    }

    #[test]
    fn test_global_ratio() {
        let row = Row::from([2., 4., 8.]);
        assert_eq!(Aggregation::Global.aggregate(Operator::Ratio, &row), Some(4.0));
    }

    #[test]
    fn test_global_stops_at_zero_denominator() {
        let row = Row::from([2., 0., 8.]);
        assert_eq!(Aggregation::Global.aggregate(Operator::Ratio, &row), None);
        assert_eq!(Aggregation::Global.aggregate(Operator::Diff, &row), Some(6.0));
    }

    #[test]
    fn test_global_logratio() {
        let row = Row::from([-1., -2., -4.]);
        assert_approx_eq!(
            Aggregation::Global.aggregate(Operator::LogRatio, &row),
            Some(2. * 2f64.ln()),
            epsilon = 1e-12
        );

        let row = Row::from([-1., -2., 4.]);
        assert_eq!(Aggregation::Global.aggregate(Operator::LogRatio, &row), None);
    }

    #[test]
    fn test_end_to_end_ratio() {
        let row = Row::from([10., 5., 2.]);

        assert_approx_eq!(
            Aggregation::TwoPoint.aggregate(Operator::Ratio, &row),
            Some(0.2),
            epsilon = 1e-12
        );
        assert_approx_eq!(
            Aggregation::Fixed.aggregate(Operator::Ratio, &row),
            Some(0.7),
            epsilon = 1e-12
        );
        assert_approx_eq!(
            Aggregation::Global.aggregate(Operator::Ratio, &row),
            Some(0.9),
            epsilon = 1e-12
        );
    }
}
