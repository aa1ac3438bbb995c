//! Stores the transactions sheet as a SQLite table named after the sheet.

use rusqlite::{Connection, params_from_iter, types::Value};

use crate::{
    Error,
    store::{SHEET_NAME, Sheet, SheetStore},
    transaction::{Transaction, row_for_header},
};

/// A transactions sheet kept in a SQLite table.
///
/// Every cell is stored as text, mirroring a spreadsheet. Tables created by
/// older versions of the app may lack the classification column, the table is
/// never migrated.
#[derive(Debug)]
pub struct SqliteSheetStore {
    connection: Connection,
}

impl SqliteSheetStore {
    /// Create a store backed by `connection`, creating the table if it does not
    /// exist.
    ///
    /// # Errors
    /// Returns an error if the table could not be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_sheet_table(&connection)?;

        Ok(Self { connection })
    }

    fn column_names(&self) -> Result<Vec<String>, Error> {
        let statement = self
            .connection
            .prepare(&format!("SELECT * FROM {} LIMIT 0", quote(SHEET_NAME)))?;

        Ok(statement
            .column_names()
            .into_iter()
            .map(str::to_owned)
            .collect())
    }
}

/// Create the transactions table with the current header.
pub fn create_sheet_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {} (
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                amount TEXT NOT NULL,
                category TEXT NOT NULL,
                type TEXT NOT NULL,
                transaction_type TEXT
                )",
            quote(SHEET_NAME)
        ),
        (),
    )?;

    Ok(())
}

impl SheetStore for SqliteSheetStore {
    fn read_sheet(&self) -> Result<Sheet, Error> {
        let mut statement = self
            .connection
            .prepare(&format!("SELECT * FROM {} ORDER BY rowid", quote(SHEET_NAME)))?;
        let header: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(str::to_owned)
            .collect();
        let column_count = header.len();

        let rows = statement
            .query_map([], |row| {
                (0..column_count)
                    .map(|index| row.get::<_, Value>(index).map(value_to_cell))
                    .collect::<Result<Vec<String>, rusqlite::Error>>()
            })?
            .collect::<Result<Vec<Vec<String>>, rusqlite::Error>>()?;

        Ok(Sheet { header, rows })
    }

    fn append(&mut self, transaction: &Transaction) -> Result<(), Error> {
        let header = self.column_names()?;
        let row = row_for_header(transaction, &header);

        let columns = header
            .iter()
            .map(|name| quote(name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=header.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");

        self.connection.execute(
            &format!(
                "INSERT INTO {} ({columns}) VALUES ({placeholders})",
                quote(SHEET_NAME)
            ),
            params_from_iter(row.iter()),
        )?;

        tracing::debug!(
            "Appended transaction \"{}\" to the {SHEET_NAME} table",
            transaction.description
        );

        Ok(())
    }
}

/// Quote an SQL identifier.
fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn value_to_cell(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(number) => number.to_string(),
        Value::Real(number) => number.to_string(),
        Value::Text(text) => text,
        Value::Blob(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}
