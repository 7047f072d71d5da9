//! Utilities for writing tables.

use std::{fmt, io};

use crate::{
    rank::Rank,
    row::{Formatted, Value, NA},
};

use super::DEFAULT_DELIMITER;

/// A writer of delimited rows.
#[derive(Debug)]
pub struct Writer<W> {
    inner: W,
    delimiter: char,
    precision: usize,
}

impl<W> Writer<W>
where
    W: io::Write,
{
    /// Creates a new writer with default delimiter and a precision of six digits.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            delimiter: DEFAULT_DELIMITER,
            precision: 6,
        }
    }

    /// Set delimiter between fields.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set precision used when writing values.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Writes a header line.
    pub fn write_header<I>(&mut self, names: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.write_with_delimiter(names)
    }

    /// Writes a line of values.
    pub fn write_values(&mut self, values: &[Value]) -> io::Result<()> {
        let precision = self.precision;

        self.write_with_delimiter(
            values
                .iter()
                .map(|&value| Formatted::new(value, precision)),
        )
    }

    /// Writes a line of values followed by ranks.
    pub fn write_values_and_ranks(&mut self, values: &[Value], ranks: &[Rank]) -> io::Result<()> {
        let precision = self.precision;

        let values = values
            .iter()
            .map(|&value| Formatted::new(value, precision).to_string());
        let ranks = ranks.iter().map(|rank| match rank {
            Some(rank) => rank.to_string(),
            None => String::from(NA),
        });

        self.write_with_delimiter(values.chain(ranks))
    }

    /// Writes a line of ranks.
    pub fn write_ranks(&mut self, ranks: &[Rank]) -> io::Result<()> {
        self.write_values_and_ranks(&[], ranks)
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    fn write_with_delimiter<I>(&mut self, items: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        for (i, x) in items.into_iter().enumerate() {
            if i > 0 {
                write!(self.inner, "{}", self.delimiter)?;
            }
            write!(self.inner, "{x}")?;
        }
        writeln!(self.inner)
    }
}
