//! Budget Pro is a web app for tracking income and expenses and budgeting
//! with the 50/30/20 rule.
//!
//! Transactions are kept in a "Transactions" sheet, either a CSV file or a
//! SQLite table. Every page reads the whole sheet, so the sheet can also be
//! edited by hand while the server is running.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod store;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{
    BudgetAllocation, BudgetBucket, DashboardSummary, MonthlyTotals, NEEDS_SHARE, SAVINGS_SHARE,
    Totals, WANTS_SHARE, compute_budget_allocation, compute_category_breakdown,
    compute_monthly_series, compute_totals, is_duplicate,
};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use store::{CsvSheetStore, SHEET_HEADER, SHEET_NAME, Sheet, SheetStore, SqliteSheetStore};
pub use transaction::{
    Ledger, REQUIRED_COLUMNS, SchemaVersion, Transaction, TransactionBuilder, TransactionKind,
    TransactionType, load_ledger,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for the Ctrl+C signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
