use std::io;

use anyhow::Error;

use centrality_core::{
    rank,
    table::{Reader, Writer},
    Estimates,
};

pub struct Runner<R, W> {
    reader: Reader<R>,
    writer: Writer<W>,
    estimates: Estimates,
    header: bool,
    rank: bool,
}

impl<R, W> Runner<R, W>
where
    R: io::BufRead,
    W: io::Write,
{
    pub fn new(
        reader: Reader<R>,
        writer: Writer<W>,
        estimates: Estimates,
        header: bool,
        rank: bool,
    ) -> Self {
        Self {
            reader,
            writer,
            estimates,
            header,
            rank,
        }
    }

    pub fn run(&mut self) -> Result<(), Error> {
        if self.header {
            self.write_header()?;
        }

        if self.rank {
            self.run_ranked()?;
        } else {
            self.run_streaming()?;
        }

        if let Some(conditions) = self.reader.conditions() {
            log::debug!("Read rows with {conditions} conditions");
        }

        self.writer.flush()?;

        Ok(())
    }

    fn write_header(&mut self) -> Result<(), Error> {
        let mut names = self
            .estimates
            .metrics()
            .map(|metric| metric.to_string())
            .collect::<Vec<_>>();

        if self.rank {
            let rank_names = names
                .iter()
                .map(|name| format!("{name}_rank"))
                .collect::<Vec<_>>();
            names.extend(rank_names);
        }

        self.writer.write_header(names)?;

        Ok(())
    }

    fn run_streaming(&mut self) -> Result<(), Error> {
        let mut rows = 0;
        let mut defined = vec![false; self.estimates.len()];

        while let Some(row) = self.reader.read_row()? {
            let values = self.estimates.estimate_row(&row);

            defined
                .iter_mut()
                .zip(values.iter())
                .for_each(|(defined, value)| *defined |= value.is_some());

            self.writer.write_values(&values)?;
            rows += 1;
        }

        log::info!("Estimated {rows} rows");

        for (metric, defined) in self.estimates.metrics().zip(defined) {
            if !defined && rows > 0 {
                warn_undefined(metric);
            }
        }

        Ok(())
    }

    fn run_ranked(&mut self) -> Result<(), Error> {
        while let Some(row) = self.reader.read_row()? {
            self.estimates.push_row(&row);
        }

        let rows = self.estimates.rows();
        log::info!("Estimated {rows} rows, ranking");

        let ranks = rank::rank_columns(self.estimates.iter().map(|(_, column)| column));

        for (metric, column) in self.estimates.iter() {
            if rows > 0 && column.iter().all(Option::is_none) {
                warn_undefined(metric);
            }
        }

        for i in 0..rows {
            let values = self.estimates.row(i).unwrap_or_default();
            let row_ranks = ranks
                .iter()
                .map(|column| column.get(i).copied().flatten())
                .collect::<Vec<_>>();

            self.writer.write_values_and_ranks(&values, &row_ranks)?;
        }

        Ok(())
    }
}

fn warn_undefined<M>(metric: M)
where
    M: std::fmt::Display,
{
    log::warn!("No estimates could be made for metric '{metric}' in any row");
}
