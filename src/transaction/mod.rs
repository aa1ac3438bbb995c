//! Transaction management for the finance dashboard.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The loader that turns the rows of the transactions sheet into transactions
//! - View handlers for the transaction list and the entry form

mod core;
mod create_endpoint;
mod create_page;
mod form;
mod schema;
mod transactions_page;

pub use core::{MAX_AMOUNT, Transaction, TransactionBuilder, TransactionKind, TransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use form::get_category_options;
pub use schema::{Ledger, REQUIRED_COLUMNS, SchemaVersion, load_ledger, row_for_header};
pub use transactions_page::get_transactions_page;
