#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Estimation of per-bin centrality across ordered conditions.
//!
//! This serves as the core library implementation for the `centrality` CLI, but can also be
//! used as a free-standing library.
//!
//! # Overview
//!
//! Each bin is described by a [`Row`] of values, one per condition, with conditions ordered by
//! increasing treatment intensity. Values may be missing. A row may first be preprocessed by a
//! cumulative [`Transform`], and is then reduced to a single estimate by a [`Metric`]: a
//! combination of an [`Aggregation`] across conditions and a pairwise [`Operator`].
//!
//! Missing values are never an error. Any comparison involving a missing value, or which is
//! undefined for its operands, is missing, and so is any aggregation which encounters a missing
//! comparison.
//!
//! # Example
//!
//! ```
//! use centrality_core::{Aggregation, Metric, Operator, Row};
//!
//! let row = Row::from([10., 5., 2.]);
//!
//! // Sum of ratios against the first condition
//! let metric = Metric::new(Aggregation::Fixed, Operator::Ratio);
//! let estimate = metric.estimate(&row).expect("no missing values");
//!
//! assert!((estimate - 0.7).abs() < 1e-12);
//!
//! // Ratio against a zero is undefined, and so missing
//! let row = Row::from([0., 5., 2.]);
//! assert_eq!(metric.estimate(&row), None);
//! ```

#[cfg(test)]
#[macro_use]
pub(crate) mod approx;

pub mod aggregation;
pub use aggregation::Aggregation;

pub mod input;
pub use input::Input;

pub mod metric;
pub use metric::{Estimates, Metric};

pub mod operator;
pub use operator::Operator;

pub mod rank;

pub mod row;
pub use row::{Row, Value};

pub mod table;

pub mod transform;
pub use transform::{Transform, Triplet};
