//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;

use crate::{alert::Alert, internal_server_error::InternalServerError, transaction::MAX_AMOUNT};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The description of a new transaction was empty or only whitespace.
    #[error("the description cannot be empty")]
    EmptyDescription,

    /// The trimmed description of a new transaction was shorter than the
    /// minimum number of characters.
    #[error("the description must be at least {0} characters long")]
    DescriptionTooShort(usize),

    /// The amount of a new transaction was zero or negative.
    ///
    /// Amounts are always recorded as positive magnitudes, the direction of
    /// the money is carried by the transaction kind.
    #[error("{0} is not a positive amount")]
    NonPositiveAmount(Decimal),

    /// The amount of a new transaction was larger than
    /// [MAX_AMOUNT](crate::transaction::MAX_AMOUNT).
    #[error("{0} is larger than the largest allowed amount")]
    AmountTooLarge(Decimal),

    /// The amount could not be parsed as a decimal number.
    #[error("could not parse \"{0}\" as an amount")]
    InvalidAmount(String),

    /// The date could not be parsed as an ISO 8601 calendar date (YYYY-MM-DD).
    #[error("could not parse \"{0}\" as a date")]
    InvalidDate(String),

    /// No category was selected for a new transaction.
    #[error("the category cannot be empty")]
    EmptyCategory,

    /// A transaction with the same date, description, amount and category
    /// already exists in the sheet.
    ///
    /// This is a normal rejection of the write rather than a fault.
    #[error("an identical transaction already exists")]
    DuplicateTransaction,

    /// The transactions sheet does not have one of the columns that every
    /// schema version requires.
    #[error("the transactions sheet is missing the column \"{0}\"")]
    MissingColumn(String),

    /// The sheet file could not be read or written.
    #[error("could not access the transactions sheet: {0}")]
    StoreIo(String),

    /// The sheet file could not be parsed or written as CSV.
    #[error("could not read or write the transactions sheet as CSV: {0}")]
    Csv(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the lock on the transaction store.
    #[error("could not acquire the transaction store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::Csv(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::StoreIo(value.to_string())
    }
}

impl Error {
    fn is_store_error(&self) -> bool {
        matches!(
            self,
            Error::StoreIo(_) | Error::Csv(_) | Error::SqlError(_) | Error::StoreLockError
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::MissingColumn(column) => InternalServerError {
                description: "Transactions Sheet Is Missing a Column",
                fix: &format!(
                    "The \"Transactions\" sheet needs a \"{column}\" column in its header row. \
                    Add the column and reload the page."
                ),
            }
            .into_response(),
            error if error.is_store_error() => {
                tracing::error!("Could not load transactions: {error}");
                InternalServerError {
                    description: "Could Not Load Transactions",
                    fix: "The transactions sheet could not be read. Try again later or check the server logs.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::EmptyDescription => (
                StatusCode::BAD_REQUEST,
                Alert::error("Missing description", "Enter a description for the transaction."),
            ),
            Error::DescriptionTooShort(min_length) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Description too short",
                    &format!("The description must be at least {min_length} characters long."),
                ),
            ),
            Error::NonPositiveAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!("{amount} is not allowed. Enter an amount greater than zero."),
                ),
            ),
            Error::AmountTooLarge(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!("{amount} is too large. Enter an amount of at most {MAX_AMOUNT}."),
                ),
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!("\"{amount}\" is not a number. Enter an amount such as 12.34."),
                ),
            ),
            Error::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid date",
                    &format!("\"{date}\" is not a valid date. Use the format YYYY-MM-DD."),
                ),
            ),
            Error::EmptyCategory => (
                StatusCode::BAD_REQUEST,
                Alert::error("Missing category", "Select a category for the transaction."),
            ),
            Error::DuplicateTransaction => (
                StatusCode::CONFLICT,
                Alert::error(
                    "Duplicate transaction",
                    "A transaction with the same date, description, amount and category \
                    already exists. It was not added again.",
                ),
            ),
            Error::MissingColumn(column) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Transactions sheet is missing a column",
                    &format!("Add a \"{column}\" column to the header row of the sheet."),
                ),
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                ),
            ),
            error if error.is_store_error() => {
                tracing::error!("Could not access the transaction store: {error}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Alert::error(
                        "Could not save transaction",
                        "The transactions sheet could not be reached. Please try again.",
                    ),
                )
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use rust_decimal::Decimal;

    use crate::Error;

    #[test]
    fn validation_errors_are_bad_requests() {
        let errors = [
            Error::EmptyDescription,
            Error::DescriptionTooShort(3),
            Error::NonPositiveAmount(Decimal::ZERO),
            Error::AmountTooLarge(Decimal::MAX),
            Error::InvalidAmount("abc".to_owned()),
            Error::InvalidDate("yesterday".to_owned()),
            Error::EmptyCategory,
        ];

        for error in errors {
            let description = error.to_string();
            let response = error.into_alert_response();

            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "want 400 for \"{description}\""
            );
        }
    }

    #[test]
    fn duplicate_is_a_conflict() {
        let response = Error::DuplicateTransaction.into_alert_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn store_errors_are_service_unavailable_alerts() {
        let response = Error::StoreIo("disk on fire".to_owned()).into_alert_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn store_errors_render_error_page() {
        let response = Error::StoreLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
