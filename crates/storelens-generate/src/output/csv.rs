use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use storelens_core::{Table, TableSet};

use crate::errors::GenerationError;

/// Write one table as CSV with a header row.
pub fn write_table_csv(path: &Path, table: &Table) -> Result<u64, csv::Error> {
    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(table.columns())?;
    for row in table.rows() {
        let record: Vec<String> = row.iter().map(|value| value.to_csv()).collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

/// Persist every table in the set under `<prefix>_<stem>_dataset.csv`.
pub fn write_table_set(
    dir: &Path,
    prefix: &str,
    set: &TableSet,
) -> Result<u64, GenerationError> {
    std::fs::create_dir_all(dir)?;
    let mut bytes = 0_u64;
    for (name, table) in set.iter() {
        let path = dir.join(name.file_name(prefix));
        bytes += write_table_csv(&path, table)?;
        info!(table = %name, path = %path.display(), rows = table.row_count(), "table persisted");
    }
    Ok(bytes)
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
