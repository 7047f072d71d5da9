//! Pairwise comparison operators.

use std::fmt;

use crate::row::Value;

/// An operator comparing two condition values.
///
/// Any comparison involving a missing value is itself missing, and so is any comparison that
/// is undefined for the given operands.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    /// The ratio `a / b`, undefined for `b = 0`.
    Ratio,
    /// The difference `a - b`.
    Diff,
    /// The log-ratio `ln(a / b)`, defined only when both `a` and `b` are strictly negative.
    LogRatio,
}

impl Operator {
    /// All operators.
    pub const VARIANTS: [Operator; 3] = [Operator::Ratio, Operator::Diff, Operator::LogRatio];

    /// Compares `a` against `b`.
    ///
    /// Comparisons that overflow to a non-finite number are missing.
    pub fn estimate(self, a: Value, b: Value) -> Value {
        let (a, b) = (a?, b?);

        let estimate = match self {
            Operator::Ratio => (b != 0.0).then(|| a / b),
            Operator::Diff => Some(a - b),
            // Both operands must be strictly negative here, not strictly positive
            Operator::LogRatio => (a < 0.0 && b < 0.0).then(|| (a / b).ln()),
        };

        estimate.filter(|v| v.is_finite())
    }

    /// Returns the name of the operator.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Ratio => "ratio",
            Operator::Diff => "diff",
            Operator::LogRatio => "logratio",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_is_absorbing() {
        for operator in Operator::VARIANTS {
            assert_eq!(operator.estimate(None, Some(-2.0)), None);
            assert_eq!(operator.estimate(Some(-2.0), None), None);
            assert_eq!(operator.estimate(None, None), None);
        }
    }

    #[test]
    fn test_ratio() {
        assert_eq!(Operator::Ratio.estimate(Some(4.0), Some(2.0)), Some(2.0));
        assert_eq!(Operator::Ratio.estimate(Some(-3.0), Some(2.0)), Some(-1.5));
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(Operator::Ratio.estimate(Some(4.0), Some(0.0)), None);
        assert_eq!(Operator::Ratio.estimate(Some(0.0), Some(0.0)), None);
        assert_eq!(Operator::Ratio.estimate(Some(4.0), Some(-0.0)), None);
    }

    #[test]
    fn test_overflow_is_missing() {
        assert_eq!(Operator::Ratio.estimate(Some(1e308), Some(1e-308)), None);
        assert_eq!(Operator::Diff.estimate(Some(f64::MAX), Some(-f64::MAX)), None);
    }

    #[test]
    fn test_diff() {
        assert_eq!(Operator::Diff.estimate(Some(4.0), Some(2.5)), Some(1.5));
        assert_eq!(Operator::Diff.estimate(Some(0.0), Some(3.0)), Some(-3.0));
        assert_eq!(Operator::Diff.estimate(Some(1.0), Some(0.0)), Some(1.0));
    }

    #[test]
    fn test_logratio_strictly_negative() {
        assert_approx_eq!(
            Operator::LogRatio.estimate(Some(-4.0), Some(-2.0)),
            Some(2f64.ln()),
            epsilon = 1e-12
        );
        assert_approx_eq!(
            Operator::LogRatio.estimate(Some(-1.0), Some(-1.0)),
            Some(0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_logratio_non_negative_operand() {
        assert_eq!(Operator::LogRatio.estimate(Some(4.0), Some(2.0)), None);
        assert_eq!(Operator::LogRatio.estimate(Some(-4.0), Some(2.0)), None);
        assert_eq!(Operator::LogRatio.estimate(Some(4.0), Some(-2.0)), None);
        assert_eq!(Operator::LogRatio.estimate(Some(0.0), Some(-2.0)), None);
        assert_eq!(Operator::LogRatio.estimate(Some(-2.0), Some(0.0)), None);
    }
}
