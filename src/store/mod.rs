//! Contains the trait and implementations for the "Transactions" sheet.
//!
//! The sheet is a plain table of text cells with a header row, the same shape a
//! spreadsheet has. Interpreting the cells is left to
//! [load_ledger](crate::transaction::load_ledger).

mod csv_sheet;
mod sqlite_sheet;

use std::sync::{Arc, Mutex};

pub use csv_sheet::CsvSheetStore;
pub use sqlite_sheet::SqliteSheetStore;

use crate::{
    Error,
    transaction::{Ledger, Transaction, load_ledger},
};

/// The name of the sheet (or table) that holds the transactions.
pub const SHEET_NAME: &str = "Transactions";

/// The header written to new sheets.
pub const SHEET_HEADER: [&str; 6] = [
    "date",
    "description",
    "amount",
    "category",
    "type",
    "transaction_type",
];

/// The raw contents of a sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// The column names in the first row. Empty if the sheet has no rows at all.
    pub header: Vec<String>,
    /// Every row after the header, in the order they were appended.
    pub rows: Vec<Vec<String>>,
}

/// Handles reading and appending rows of the transactions sheet.
///
/// Rows are never updated or deleted.
pub trait SheetStore {
    /// Read every row of the sheet.
    fn read_sheet(&self) -> Result<Sheet, Error>;

    /// Append `transaction` as a new row.
    ///
    /// Implementers should write the row in the layout of the sheet's existing
    /// header, see [row_for_header](crate::transaction::row_for_header).
    fn append(&mut self, transaction: &Transaction) -> Result<(), Error>;
}

/// A sheet store that can be shared between request handlers.
///
/// The lock is held for the whole read, duplicate check and append sequence so
/// that concurrent submissions cannot both pass the duplicate check.
pub type SharedSheetStore = Arc<Mutex<dyn SheetStore + Send>>;

/// Wrap `store` so it can be shared between request handlers.
pub fn share<S: SheetStore + Send + 'static>(store: S) -> SharedSheetStore {
    Arc::new(Mutex::new(store))
}

/// Read the whole sheet and parse it into transactions.
///
/// # Errors
/// Returns [Error::StoreLockError] if the store lock is poisoned, a store error
/// if the sheet could not be read, or [Error::MissingColumn] if the sheet's
/// header is missing a required column.
pub fn read_ledger(store: &SharedSheetStore) -> Result<Ledger, Error> {
    let sheet = store
        .lock()
        .map_err(|error| {
            tracing::error!("could not acquire store lock: {error}");
            Error::StoreLockError
        })?
        .read_sheet()?;

    load_ledger(&sheet)
}
