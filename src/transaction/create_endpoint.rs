//! Defines the endpoint for recording a new transaction.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::is_duplicate,
    endpoints,
    store::SharedSheetStore,
    transaction::{
        Transaction,
        core::TransactionType,
        schema::{load_ledger, parse_amount, parse_date},
    },
};

/// The state needed to record a transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// The sheet that new transactions are appended to.
    pub store: SharedSheetStore,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The form data for recording a transaction.
///
/// The amount and date are kept as text so that bad input can be reported
/// with an alert instead of a generic rejection.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in dollars.
    pub amount: String,
    /// The date when the transaction occurred, e.g. "2025-03-14".
    pub date: String,
    /// Text detailing the transaction.
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub transaction_type: TransactionType,
}

impl TransactionForm {
    fn into_transaction(self) -> Result<Transaction, Error> {
        let amount = parse_amount(&self.amount).map_err(|_| Error::InvalidAmount(self.amount))?;
        let date = parse_date(&self.date).map_err(|_| Error::InvalidDate(self.date))?;

        Transaction::build(amount, date, &self.description)
            .category(&self.category)
            .classified_as(self.transaction_type)
            .validate()
    }
}

/// A route handler for recording a new transaction, redirects to the dashboard on success.
///
/// The transaction is rejected if it is invalid or if an identical transaction
/// is already in the sheet.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match form.into_transaction() {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::debug!("rejected transaction form: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = append_unless_duplicate(&state.store, &transaction) {
        if matches!(error, Error::DuplicateTransaction) {
            tracing::info!("skipped duplicate transaction {transaction:?}");
        } else {
            tracing::error!("could not record transaction: {error}");
        }

        return error.into_alert_response();
    }

    tracing::info!("recorded transaction {transaction:?}");

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// Append `transaction` to the sheet unless the sheet already holds a duplicate.
///
/// The store stays locked from the read until the append finishes.
fn append_unless_duplicate(
    store: &SharedSheetStore,
    transaction: &Transaction,
) -> Result<(), Error> {
    let mut store = store.lock().map_err(|error| {
        tracing::error!("could not acquire store lock: {error}");
        Error::StoreLockError
    })?;

    let ledger = load_ledger(&store.read_sheet()?)?;

    if is_duplicate(&ledger.transactions, transaction) {
        return Err(Error::DuplicateTransaction);
    }

    store.append(transaction)
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        endpoints,
        store::{SharedSheetStore, SqliteSheetStore, read_ledger, share},
        test_utils::{assert_hx_redirect, parse_html_fragment},
        transaction::{
            TransactionKind,
            core::TransactionType,
            create_endpoint::{CreateTransactionState, TransactionForm},
            create_transaction_endpoint,
        },
    };

    fn get_store() -> SharedSheetStore {
        let connection = Connection::open_in_memory().unwrap();
        share(SqliteSheetStore::new(connection).unwrap())
    }

    fn grocery_form() -> TransactionForm {
        TransactionForm {
            amount: "42.50".to_owned(),
            date: "2025-03-14".to_owned(),
            description: "Weekly shop".to_owned(),
            category: "Groceries".to_owned(),
            transaction_type: TransactionType::Need,
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = CreateTransactionState { store: get_store() };

        let response = create_transaction_endpoint(State(state.clone()), Form(grocery_form()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);

        let ledger = read_ledger(&state.store).unwrap();
        assert_eq!(ledger.transactions.len(), 1);
        let transaction = &ledger.transactions[0];
        assert_eq!(transaction.date, date!(2025 - 03 - 14));
        assert_eq!(transaction.amount, Decimal::new(4250, 2));
        assert_eq!(transaction.category, "Groceries");
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(transaction.transaction_type, Some(TransactionType::Need));
    }

    #[tokio::test]
    async fn income_type_records_income() {
        let state = CreateTransactionState { store: get_store() };
        let form = TransactionForm {
            amount: "1000".to_owned(),
            date: "2025-03-01".to_owned(),
            description: "March salary".to_owned(),
            category: "Salary".to_owned(),
            transaction_type: TransactionType::Income,
        };

        create_transaction_endpoint(State(state.clone()), Form(form)).await;

        let ledger = read_ledger(&state.store).unwrap();
        assert_eq!(ledger.transactions[0].kind, TransactionKind::Income);
    }

    #[tokio::test]
    async fn rejects_duplicate_transaction() {
        let state = CreateTransactionState { store: get_store() };

        create_transaction_endpoint(State(state.clone()), Form(grocery_form())).await;
        let response =
            create_transaction_endpoint(State(state.clone()), Form(grocery_form())).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let html = parse_html_fragment(response).await;
        assert!(
            html.html().contains("Duplicate transaction"),
            "want duplicate alert, got {}",
            html.html()
        );
        assert_eq!(read_ledger(&state.store).unwrap().transactions.len(), 1);
    }

    #[tokio::test]
    async fn same_details_on_another_date_is_not_a_duplicate() {
        let state = CreateTransactionState { store: get_store() };
        let mut next_week = grocery_form();
        next_week.date = "2025-03-21".to_owned();

        create_transaction_endpoint(State(state.clone()), Form(grocery_form())).await;
        let response = create_transaction_endpoint(State(state.clone()), Form(next_week)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(read_ledger(&state.store).unwrap().transactions.len(), 2);
    }

    #[tokio::test]
    async fn rejects_invalid_forms_without_writing() {
        let cases = [
            ("0", "2025-03-14", "Weekly shop", "Groceries"),
            ("-5", "2025-03-14", "Weekly shop", "Groceries"),
            ("lots", "2025-03-14", "Weekly shop", "Groceries"),
            ("50000000000000000000000000000", "2025-03-14", "Weekly shop", "Groceries"),
            ("42.50", "14/03/2025", "Weekly shop", "Groceries"),
            ("42.50", "2025-03-14", "  ", "Groceries"),
            ("42.50", "2025-03-14", "ab", "Groceries"),
            ("42.50", "2025-03-14", "Weekly shop", ""),
        ];

        for (amount, date, description, category) in cases {
            let state = CreateTransactionState { store: get_store() };
            let form = TransactionForm {
                amount: amount.to_owned(),
                date: date.to_owned(),
                description: description.to_owned(),
                category: category.to_owned(),
                transaction_type: TransactionType::Need,
            };

            let response = create_transaction_endpoint(State(state.clone()), Form(form)).await;

            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "want bad request for {amount:?} {date:?} {description:?} {category:?}"
            );
            assert!(read_ledger(&state.store).unwrap().transactions.is_empty());
        }
    }

    #[test]
    fn decodes_submitted_form() {
        let form: TransactionForm = serde_html_form::from_str(
            "transaction_type=Want&category=Dining+Out&amount=23.10&date=2025-03-14&description=Pizza",
        )
        .unwrap();

        assert_eq!(form.transaction_type, TransactionType::Want);
        assert_eq!(form.category, "Dining Out");
        assert_eq!(form.amount, "23.10");
    }
}
