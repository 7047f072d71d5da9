//! Metrics and per-metric estimate columns.

use std::fmt;

use indexmap::IndexMap;

use crate::{
    row::{Row, Value},
    Aggregation, Operator,
};

/// A combination of an aggregation and an operator, corresponding to one output column.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Metric {
    /// The aggregation.
    pub aggregation: Aggregation,
    /// The operator.
    pub operator: Operator,
}

impl Metric {
    /// Creates a new metric.
    pub fn new(aggregation: Aggregation, operator: Operator) -> Self {
        Self {
            aggregation,
            operator,
        }
    }

    /// Returns all combinations of the provided aggregations and operators.
    ///
    /// Metrics are ordered by aggregation first, then by operator.
    pub fn combinations(aggregations: &[Aggregation], operators: &[Operator]) -> Vec<Self> {
        aggregations
            .iter()
            .flat_map(|&aggregation| {
                operators
                    .iter()
                    .map(move |&operator| Self::new(aggregation, operator))
            })
            .collect()
    }

    /// Estimates the metric for a row.
    pub fn estimate(&self, row: &Row) -> Value {
        self.aggregation.aggregate(self.operator, row)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.aggregation, self.operator)
    }
}

/// Estimates for a number of metrics across rows.
///
/// Columns are kept in the order in which metrics were first added, and each metric has at
/// most one column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Estimates(IndexMap<Metric, Vec<Value>>);

impl Estimates {
    /// Creates new, empty estimates for the provided metrics.
    pub fn new<I>(metrics: I) -> Self
    where
        I: IntoIterator<Item = Metric>,
    {
        Self(
            metrics
                .into_iter()
                .map(|metric| (metric, Vec::new()))
                .collect(),
        )
    }

    /// Returns an iterator over the metrics.
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.0.keys()
    }

    /// Returns the number of metrics.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no metrics.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of rows estimated so far.
    pub fn rows(&self) -> usize {
        self.0.values().next().map(Vec::len).unwrap_or(0)
    }

    /// Estimates every metric for a row, returning the estimates in column order.
    pub fn estimate_row(&self, row: &Row) -> Vec<Value> {
        self.metrics().map(|metric| metric.estimate(row)).collect()
    }

    /// Estimates every metric for a row, and appends the estimates to the columns.
    pub fn push_row(&mut self, row: &Row) {
        for (metric, column) in self.0.iter_mut() {
            column.push(metric.estimate(row));
        }
    }

    /// Returns an iterator over metrics and their columns.
    pub fn iter(&self) -> impl Iterator<Item = (&Metric, &[Value])> {
        self.0.iter().map(|(metric, column)| (metric, column.as_slice()))
    }

    /// Returns the estimates for the row at the provided index, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<Value>> {
        self.0
            .values()
            .map(|column| column.get(index).copied())
            .collect()
    }
}
