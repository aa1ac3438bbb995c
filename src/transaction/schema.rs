//! Normalizes the rows of the transactions sheet into [Transaction] records.
//!
//! The sheet has grown columns over time, so the header decides how each row is
//! read:
//!
//! | Version | Columns                                                       |
//! |---------|---------------------------------------------------------------|
//! | V1      | `date, description, amount, category, type`                   |
//! | V2      | V1 + `spending_type`                                          |
//! | V3      | V1 + `transaction_type`                                       |
//!
//! Column presence is checked once here so that the aggregation code can work
//! with plain, fully parsed transactions.

use std::str::FromStr;

use rust_decimal::Decimal;
use time::{Date, macros::format_description};

use crate::{
    Error,
    store::Sheet,
    transaction::{MAX_AMOUNT, Transaction, TransactionKind, TransactionType},
};

/// The columns every version of the sheet has.
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "description", "amount", "category", "type"];

/// The classification column written by current versions of the app.
pub const CLASSIFICATION_COLUMN: &str = "transaction_type";

/// The name of the classification column in older sheets.
pub const LEGACY_CLASSIFICATION_COLUMN: &str = "spending_type";

/// The layout of a transactions sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// No classification column.
    V1,
    /// Classification stored in `spending_type`.
    V2,
    /// Classification stored in `transaction_type`.
    V3,
}

impl SchemaVersion {
    /// Work out which layout `header` uses.
    ///
    /// If a sheet somehow has both classification columns, the current one wins.
    ///
    /// # Errors
    /// Returns [Error::MissingColumn] if any of [REQUIRED_COLUMNS] is absent.
    pub fn detect<S: AsRef<str>>(header: &[S]) -> Result<Self, Error> {
        let columns = ColumnIndices::new(header)?;

        Ok(columns.schema)
    }

    fn classification_column(self) -> Option<&'static str> {
        match self {
            SchemaVersion::V1 => None,
            SchemaVersion::V2 => Some(LEGACY_CLASSIFICATION_COLUMN),
            SchemaVersion::V3 => Some(CLASSIFICATION_COLUMN),
        }
    }
}

/// The transactions that could be read from a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    /// The parsed rows, in sheet order.
    pub transactions: Vec<Transaction>,
    /// The layout detected from the sheet's header.
    pub schema: SchemaVersion,
    /// The number of non-blank rows that could not be parsed.
    pub skipped_rows: usize,
}

impl Ledger {
    /// Whether the sheet records the 50/30/20 classification at all.
    pub fn has_classification(&self) -> bool {
        self.schema != SchemaVersion::V1
    }
}

/// Where each column lives in a row.
struct ColumnIndices {
    schema: SchemaVersion,
    date: usize,
    description: usize,
    amount: usize,
    category: usize,
    kind: usize,
    classification: Option<usize>,
}

impl ColumnIndices {
    fn new<S: AsRef<str>>(header: &[S]) -> Result<Self, Error> {
        let normalized: Vec<String> = header
            .iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .collect();
        let find = |name: &str| normalized.iter().position(|column| column == name);
        let require =
            |name: &str| find(name).ok_or_else(|| Error::MissingColumn(name.to_owned()));

        let date = require("date")?;
        let description = require("description")?;
        let amount = require("amount")?;
        let category = require("category")?;
        let kind = require("type")?;

        let (schema, classification) = match (
            find(CLASSIFICATION_COLUMN),
            find(LEGACY_CLASSIFICATION_COLUMN),
        ) {
            (Some(index), _) => (SchemaVersion::V3, Some(index)),
            (None, Some(index)) => (SchemaVersion::V2, Some(index)),
            (None, None) => (SchemaVersion::V1, None),
        };

        Ok(Self {
            schema,
            date,
            description,
            amount,
            category,
            kind,
            classification,
        })
    }
}

/// Parse every row of `sheet` into a [Transaction].
///
/// A sheet with no header at all has not been written to yet and gives an empty
/// ledger in the current layout. Blank rows are ignored. Rows with an
/// unparsable date, amount or type are skipped and logged. An unrecognised
/// classification is treated as missing.
///
/// # Errors
/// Returns [Error::MissingColumn] if the header lacks one of [REQUIRED_COLUMNS].
pub fn load_ledger(sheet: &Sheet) -> Result<Ledger, Error> {
    if sheet.header.iter().all(|name| name.trim().is_empty()) {
        return Ok(Ledger {
            transactions: Vec::new(),
            schema: SchemaVersion::V3,
            skipped_rows: 0,
        });
    }

    let columns = ColumnIndices::new(&sheet.header)?;
    let mut transactions = Vec::with_capacity(sheet.rows.len());
    let mut skipped_rows = 0;

    for (index, row) in sheet.rows.iter().enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        match parse_row(row, &columns) {
            Ok(transaction) => transactions.push(transaction),
            Err(reason) => {
                // Row numbers are 1-based and the header is row 1.
                tracing::warn!("Skipping row {} of the transactions sheet: {reason}", index + 2);
                skipped_rows += 1;
            }
        }
    }

    tracing::debug!(
        "Loaded {} transactions from a {:?} sheet, skipped {skipped_rows} rows",
        transactions.len(),
        columns.schema
    );

    Ok(Ledger {
        transactions,
        schema: columns.schema,
        skipped_rows,
    })
}

fn parse_row(row: &[String], columns: &ColumnIndices) -> Result<Transaction, String> {
    let cell = |index: usize| row.get(index).map(|value| value.trim()).unwrap_or_default();

    let date = parse_date(cell(columns.date))?;
    let amount = parse_amount(cell(columns.amount))?;
    if amount.abs() > MAX_AMOUNT {
        return Err(format!("amount {amount} is larger than {MAX_AMOUNT}"));
    }
    let kind = TransactionKind::from_str(cell(columns.kind))?;
    let transaction_type = columns
        .classification
        .map(cell)
        .filter(|value| !value.is_empty())
        .and_then(|value| TransactionType::from_str(value).ok());

    Ok(
        Transaction::build(amount, date, cell(columns.description))
            .category(cell(columns.category))
            .kind(kind)
            .transaction_type(transaction_type)
            .finalise(),
    )
}

/// Parse an ISO 8601 calendar date, e.g. "2025-01-31".
pub fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|error| format!("invalid date \"{text}\": {error}"))
}

/// Parse a decimal amount, allowing thousands separators, e.g. "1,234.50".
pub fn parse_amount(text: &str) -> Result<Decimal, String> {
    let cleaned = text.trim().replace(',', "");

    Decimal::from_str(&cleaned).map_err(|error| format!("invalid amount \"{text}\": {error}"))
}

/// Format `transaction` as a row for a sheet with the given `header`.
///
/// Columns the sheet does not know about are dropped and unknown columns are
/// left blank, so appends keep the sheet's existing layout.
pub fn row_for_header<S: AsRef<str>>(transaction: &Transaction, header: &[S]) -> Vec<String> {
    let classification = transaction
        .transaction_type
        .map(|transaction_type| transaction_type.to_string())
        .unwrap_or_default();
    let classification_column = SchemaVersion::detect(header)
        .ok()
        .and_then(SchemaVersion::classification_column);

    header
        .iter()
        .map(|name| match name.as_ref().trim().to_lowercase().as_str() {
            "date" => transaction.date.to_string(),
            "description" => transaction.description.clone(),
            "amount" => transaction.amount.to_string(),
            "category" => transaction.category.clone(),
            "type" => transaction.kind.to_string(),
            column if Some(column) == classification_column => classification.clone(),
            _ => String::new(),
        })
        .collect()
}
