use std::{io, path::PathBuf};

use anyhow::Error;

use clap::Parser;
use centrality_core::{
    rank::rank_columns,
    table::{self, Reader, Writer},
    Input, Value,
};

/// Rank bins by their estimates.
///
/// Each column is ranked independently, in descending order, so that the bin with the largest
/// estimate has rank 1. Tied bins share the lowest rank of the tie. Bins with missing
/// estimates are not ranked, and are given as 'NA'.
#[derive(Debug, Parser)]
pub struct Rank {
    /// Input table of estimates.
    ///
    /// The input table can be provided here or read from stdin, and may be gzip-compressed.
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Delimiter between fields in input and output.
    #[arg(short = 'd', long, default_value_t = table::DEFAULT_DELIMITER, value_name = "CHAR")]
    pub delimiter: char,

    /// Treat the first line of the input as a header, and copy it to the output.
    #[arg(short = 'H', long)]
    pub header: bool,
}

impl Rank {
    pub fn run(self) -> Result<(), Error> {
        let reader = table::read::Builder::default()
            .set_delimiter(self.delimiter)
            .set_skip_header(self.header)
            .set_min_fields(1)
            .build_from_input(&Input::new(self.input)?)?;

        let writer = Writer::new(io::stdout().lock()).with_delimiter(self.delimiter);

        run(reader, writer)
    }
}

fn run<R, W>(mut reader: Reader<R>, mut writer: Writer<W>) -> Result<(), Error>
where
    R: io::BufRead,
    W: io::Write,
{
    let mut columns: Vec<Vec<Value>> = Vec::new();

    while let Some(row) = reader.read_row()? {
        if columns.is_empty() {
            columns = vec![Vec::new(); row.conditions()];
        }

        for (column, &value) in columns.iter_mut().zip(row.iter()) {
            column.push(value);
        }
    }

    if let Some(header) = reader.header() {
        writer.write_header(header)?;
    }

    let rows = columns.first().map(Vec::len).unwrap_or(0);
    log::info!("Ranking {rows} rows in {} columns", columns.len());

    let ranks = rank_columns(columns.iter().map(Vec::as_slice));

    for i in 0..rows {
        let row_ranks = ranks.iter().map(|column| column[i]).collect::<Vec<_>>();
        writer.write_ranks(&row_ranks)?;
    }

    writer.flush()?;

    Ok(())
}
