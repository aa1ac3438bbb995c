//! Stores the transactions sheet as a CSV file with a header row.

use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use crate::{
    Error,
    store::{SHEET_HEADER, Sheet, SheetStore},
    transaction::{Transaction, row_for_header},
};

/// A transactions sheet kept in a CSV file.
#[derive(Debug, Clone)]
pub struct CsvSheetStore {
    path: PathBuf,
}

impl CsvSheetStore {
    /// Open the sheet at `path`, creating the file with the current header if
    /// it does not exist yet.
    ///
    /// An existing file is left as is, including legacy headers.
    ///
    /// # Errors
    /// Returns an error if the file could not be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            tracing::info!(
                "Creating transactions sheet at {} with the header {SHEET_HEADER:?}",
                path.display()
            );
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record(SHEET_HEADER)?;
            writer.flush()?;
        }

        Ok(Self { path })
    }

    /// The path to the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetStore for CsvSheetStore {
    fn read_sheet(&self) -> Result<Sheet, Error> {
        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record?.iter().map(str::to_owned).collect(),
            None => return Ok(Sheet::default()),
        };
        let rows = records
            .map(|record| record.map(|record| record.iter().map(str::to_owned).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

        Ok(Sheet { header, rows })
    }

    fn append(&mut self, transaction: &Transaction) -> Result<(), Error> {
        let header = self.read_sheet()?.header;
        let is_new_sheet = header.is_empty();
        let header = if is_new_sheet {
            SHEET_HEADER.iter().map(|name| name.to_string()).collect()
        } else {
            header
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Sheets edited by hand often lack a final line break, and without one
        // the new row would be joined onto the last row.
        if !ends_with_line_break(&self.path)? {
            file.write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        if is_new_sheet {
            writer.write_record(&header)?;
        }

        writer.write_record(row_for_header(transaction, &header))?;
        writer.flush()?;

        tracing::debug!(
            "Appended transaction \"{}\" to {}",
            transaction.description,
            self.path.display()
        );

        Ok(())
    }
}

/// Whether the file at `path` is empty or ends with a line break.
fn ends_with_line_break(path: &Path) -> Result<bool, Error> {
    let mut file = File::open(path)?;

    if file.metadata()?.len() == 0 {
        return Ok(true);
    }

    let mut last_byte = [0; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last_byte)?;

    Ok(last_byte[0] == b'\n')
}
