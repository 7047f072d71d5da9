//! Utilities for reading tables.

use std::io;

use crate::{row::Row, transform::Transform, Input};

use super::{ReadError, DEFAULT_DELIMITER, MIN_CONDITIONS};

/// A builder to read a table.
#[derive(Debug)]
pub struct Builder {
    delimiter: char,
    skip_header: bool,
    conditions: Option<usize>,
    min_fields: usize,
    transform: Transform,
}

impl Builder {
    /// Build reader from a reader.
    pub fn build<R>(self, reader: R) -> Reader<R>
    where
        R: io::BufRead,
    {
        Reader {
            inner: reader,
            buf: String::new(),
            line: 0,
            delimiter: self.delimiter,
            skip_header: self.skip_header,
            header: None,
            conditions: self.conditions,
            min_fields: self.min_fields,
            transform: self.transform,
        }
    }

    /// Build reader from an input source.
    pub fn build_from_input(self, input: &Input) -> io::Result<Reader<Box<dyn io::BufRead>>> {
        input.open().map(|reader| self.build(reader))
    }

    /// Set the number of conditions.
    ///
    /// If unset, the number of conditions will be inferred from the first row.
    pub fn set_conditions(mut self, conditions: usize) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Set delimiter between fields.
    ///
    /// If unset, a tab will be used.
    pub fn set_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the minimum number of fields in a row.
    ///
    /// If unset, rows must have at least two fields, as required to compare conditions.
    pub fn set_min_fields(mut self, min_fields: usize) -> Self {
        self.min_fields = min_fields;
        self
    }

    /// Set whether to skip the first line as a header.
    ///
    /// The skipped header is available from [`Reader::header`].
    pub fn set_skip_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    /// Set transform to apply to each row.
    pub fn set_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            skip_header: false,
            conditions: None,
            min_fields: MIN_CONDITIONS,
            transform: Transform::None,
        }
    }
}

/// A reader of rows from a delimited table.
///
/// Empty lines are skipped. All rows must have the same number of fields.
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    buf: String,
    line: usize,
    delimiter: char,
    skip_header: bool,
    header: Option<String>,
    conditions: Option<usize>,
    min_fields: usize,
    transform: Transform,
}

impl<R> Reader<R>
where
    R: io::BufRead,
{
    /// Returns the number of conditions.
    ///
    /// If the number of conditions was not set up front, this will be `None` until the first
    /// row has been read.
    pub fn conditions(&self) -> Option<usize> {
        self.conditions
    }

    /// Returns the fields of the skipped header line, if any has been read.
    pub fn header(&self) -> Option<Vec<&str>> {
        self.header
            .as_deref()
            .map(|header| header.split(self.delimiter).collect())
    }

    /// Reads the next row, returning `None` when the reader has finished.
    pub fn read_row(&mut self) -> Result<Option<Row>, ReadError> {
        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let line = self.buf.trim_end_matches(['\n', '\r']);

            if self.skip_header {
                self.skip_header = false;
                self.header = Some(String::from(line));
                continue;
            }

            if line.is_empty() {
                continue;
            }

            let fields = line.split(self.delimiter).collect::<Vec<_>>();
            let found = fields.len();

            if found < self.min_fields {
                return Err(ReadError::TooFewFields {
                    line: self.line,
                    min: self.min_fields,
                    found,
                });
            }

            match self.conditions {
                Some(expected) if expected != found => {
                    return Err(ReadError::FieldCount {
                        line: self.line,
                        expected,
                        found,
                    });
                }
                Some(_) => (),
                None => self.conditions = Some(found),
            }

            return self
                .transform
                .apply(fields)
                .map(Some)
                .map_err(|error| ReadError::Parse {
                    line: self.line,
                    error,
                });
        }
    }
}

impl<R> Iterator for Reader<R>
where
    R: io::BufRead,
{
    type Item = Result<Row, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row().transpose()
    }
}
