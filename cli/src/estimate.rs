use std::{io, path::PathBuf};

use anyhow::{anyhow, bail, Error};

use clap::{Parser, ValueEnum};
use centrality_core::{
    table::{self, Writer},
    Aggregation, Estimates, Input, Metric, Operator, Transform, Triplet,
};

mod runner;
use runner::Runner;

/// Estimate centrality of bins across ordered conditions.
#[derive(Debug, Parser)]
pub struct Estimate {
    /// Input table.
    ///
    /// The input table can be provided here or read from stdin, and may be gzip-compressed.
    /// Each line should contain one delimited field per condition, in order of increasing
    /// intensity. Missing values should be given as 'NA'.
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Aggregations across conditions.
    ///
    /// More than one aggregation can be provided. Use comma to separate aggregations. One output
    /// column is written for each combination of aggregation and operator, ordered by
    /// aggregation first.
    #[arg(
        short = 'a',
        long = "aggregation",
        value_enum,
        required = true,
        value_delimiter = ',',
        value_name = "AGGREGATION,..."
    )]
    pub aggregations: Vec<AggregationArg>,

    /// Operators comparing pairs of conditions.
    ///
    /// More than one operator can be provided. Use comma to separate operators.
    #[arg(
        short = 'o',
        long = "operator",
        value_enum,
        default_value = "ratio",
        value_delimiter = ',',
        value_name = "OPERATOR,..."
    )]
    pub operators: Vec<OperatorArg>,

    /// Take the running sum of values across conditions before estimating.
    #[arg(long, conflicts_with = "ratio_of_cumulative")]
    pub cumulative_of_ratio: bool,

    /// Reconstruct values from accumulated numerators and divisors before estimating.
    ///
    /// Each field should then contain three comma-separated values: a numerator, a divisor
    /// which is accumulated across conditions, and a divisor applied per condition.
    #[arg(long)]
    pub ratio_of_cumulative: bool,

    /// Number of conditions.
    ///
    /// By default, the number of conditions is inferred from the first row. In either case, it
    /// is an error for any row to have a different number of fields.
    #[arg(short = 'n', long, value_name = "INT")]
    pub conditions: Option<usize>,

    /// Delimiter between fields in input and output.
    #[arg(short = 'd', long, default_value_t = table::DEFAULT_DELIMITER, value_name = "CHAR")]
    pub delimiter: char,

    /// Skip the first line of the input as a header.
    #[arg(long)]
    pub skip_header: bool,

    /// Include a header with the names of metrics.
    #[arg(short = 'H', long)]
    pub header: bool,

    /// Precision to use when printing estimates.
    #[arg(short = 'p', long, default_value_t = 6, value_name = "INT")]
    pub precision: usize,

    /// Append a rank column for each metric.
    ///
    /// Bins are ranked in descending order of estimates, with ties sharing the lowest rank. Bins
    /// without an estimate are not ranked. Ranking requires all estimates to be kept in memory.
    #[arg(short = 'r', long)]
    pub rank: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum AggregationArg {
    /// Compare the last condition against the first.
    #[value(name = "two_point")]
    TwoPoint,
    /// Sum comparisons of each condition against the first.
    Fixed,
    /// Sum comparisons of each condition against the preceding condition.
    Global,
}

impl From<AggregationArg> for Aggregation {
    fn from(arg: AggregationArg) -> Self {
        match arg {
            AggregationArg::TwoPoint => Aggregation::TwoPoint,
            AggregationArg::Fixed => Aggregation::Fixed,
            AggregationArg::Global => Aggregation::Global,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperatorArg {
    /// Ratio of conditions, undefined when dividing by zero.
    Ratio,
    /// Difference of conditions.
    Diff,
    /// Natural logarithm of the ratio of conditions, defined only when both are negative.
    #[value(name = "logratio")]
    LogRatio,
}

impl From<OperatorArg> for Operator {
    fn from(arg: OperatorArg) -> Self {
        match arg {
            OperatorArg::Ratio => Operator::Ratio,
            OperatorArg::Diff => Operator::Diff,
            OperatorArg::LogRatio => Operator::LogRatio,
        }
    }
}

impl Estimate {
    fn metrics(&self) -> Vec<Metric> {
        let aggregations = self
            .aggregations
            .iter()
            .map(|&arg| Aggregation::from(arg))
            .collect::<Vec<_>>();
        let operators = self
            .operators
            .iter()
            .map(|&arg| Operator::from(arg))
            .collect::<Vec<_>>();

        Metric::combinations(&aggregations, &operators)
    }

    fn transform(&self) -> Result<Transform, Error> {
        let transform = Transform::from_flags(self.cumulative_of_ratio, self.ratio_of_cumulative)
            .ok_or_else(|| anyhow!("cumulative transforms are mutually exclusive"))?;

        if transform == Transform::RatioOfCumulative && self.delimiter == Triplet::SEPARATOR {
            bail!(
                "delimiter '{}' cannot be used with --ratio-of-cumulative, \
                since it separates the values within each field",
                self.delimiter
            );
        }

        Ok(transform)
    }

    pub fn run(self) -> Result<(), Error> {
        let estimates = Estimates::new(self.metrics());
        let transform = self.transform()?;

        log::info!(
            "Estimating {} using transform {transform:?}",
            estimates
                .metrics()
                .map(|metric| metric.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut builder = table::read::Builder::default()
            .set_delimiter(self.delimiter)
            .set_skip_header(self.skip_header)
            .set_transform(transform);
        if let Some(conditions) = self.conditions {
            builder = builder.set_conditions(conditions);
        }
        let reader = builder.build_from_input(&Input::new(self.input)?)?;

        let writer = Writer::new(io::stdout().lock())
            .with_delimiter(self.delimiter)
            .with_precision(self.precision);

        let mut runner = Runner::new(reader, writer, estimates, self.header, self.rank);
        runner.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::error::ErrorKind as ClapErrorKind;

    use crate::tests::{parse_subcmd, try_parse_subcmd};

    #[test]
    fn test_aggregation_required() {
        let result = try_parse_subcmd::<Estimate>("centrality estimate input.tsv");

        assert_eq!(
            result.unwrap_err().kind(),
            ClapErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cumulative_flags_conflict() {
        let result = try_parse_subcmd::<Estimate>(
            "centrality estimate -a fixed --cumulative-of-ratio --ratio-of-cumulative input.tsv",
        );

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_parse_metrics() {
        let args = parse_subcmd::<Estimate>(
            "centrality estimate -a two_point,global -o ratio,logratio input.tsv",
        );

        assert_eq!(
            args.aggregations,
            vec![AggregationArg::TwoPoint, AggregationArg::Global]
        );
        assert_eq!(
            args.metrics(),
            vec![
                Metric::new(Aggregation::TwoPoint, Operator::Ratio),
                Metric::new(Aggregation::TwoPoint, Operator::LogRatio),
                Metric::new(Aggregation::Global, Operator::Ratio),
                Metric::new(Aggregation::Global, Operator::LogRatio),
            ]
        );
    }

    #[test]
    fn test_default_operator_and_transform() {
        let args = parse_subcmd::<Estimate>("centrality estimate -a fixed input.tsv");

        assert_eq!(args.operators, vec![OperatorArg::Ratio]);
        assert_eq!(args.delimiter, '\t');
        assert_eq!(args.transform().unwrap(), Transform::None);
    }

    #[test]
    fn test_parse_transform() {
        let args =
            parse_subcmd::<Estimate>("centrality estimate -a fixed --ratio-of-cumulative input.tsv");

        assert_eq!(args.transform().unwrap(), Transform::RatioOfCumulative);
    }

    #[test]
    fn test_ratio_of_cumulative_triplet_delimiter() {
        let args = parse_subcmd::<Estimate>(
            "centrality estimate -a fixed -d , --ratio-of-cumulative input.tsv",
        );

        assert_eq!(
            args.transform().unwrap_err().to_string(),
            "delimiter ',' cannot be used with --ratio-of-cumulative, \
            since it separates the values within each field"
        );

        let args = parse_subcmd::<Estimate>("centrality estimate -a fixed -d , input.tsv");
        assert_eq!(args.transform().unwrap(), Transform::None);
    }

    #[test]
    fn test_unknown_aggregation() {
        let result = try_parse_subcmd::<Estimate>("centrality estimate -a two-point input.tsv");

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::InvalidValue);
    }
}
