//! Defines the route handler for the page for creating a new transaction.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles, loading_spinner},
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::{
        core::TransactionType,
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

fn create_transaction_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();
    let fields = transaction_form_fields(&TransactionFormDefaults {
        transaction_type: TransactionType::Need,
        date: today,
    });

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add New Transaction" }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Add Transaction"
                }
            }
        }
    };

    base("Add Transaction", &[dollar_input_styles()], &content)
}

/// The state needed for create new transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for creating a transaction.
///
/// The date defaults to today in the configured timezone.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;

    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

    Ok(create_transaction_view(today).into_response())
}

#[cfg(test)]
mod view_tests {
    use axum::extract::State;
    use scraper::Selector;
    use time::OffsetDateTime;

    use crate::{
        Error, endpoints,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_input_with_value,
            assert_form_submit_button, assert_hx_endpoint, assert_status_ok, assert_valid_html,
            must_get_form, parse_html_document,
        },
        transaction::{create_page::CreateTransactionPageState, get_create_transaction_page},
    };

    fn get_state() -> CreateTransactionPageState {
        CreateTransactionPageState {
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn new_transaction_returns_form() {
        let response = get_create_transaction_page(State(get_state()))
            .await
            .unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "description", "text");
        assert_form_input(&form, "transaction_type", "radio");
        assert_form_input_with_value(
            &form,
            "date",
            "date",
            &OffsetDateTime::now_utc().date().to_string(),
        );
        assert_form_submit_button(&form);

        let category_selector = Selector::parse("select[name=category]").unwrap();
        assert_eq!(form.select(&category_selector).count(), 1);
    }

    #[tokio::test]
    async fn amount_steps_in_cents() {
        let response = get_create_transaction_page(State(get_state()))
            .await
            .unwrap();
        let document = parse_html_document(response).await;

        let amount = document
            .select(&Selector::parse("input[name=amount]").unwrap())
            .next()
            .expect("amount input missing");
        assert_eq!(amount.value().attr("step"), Some("0.01"));
    }

    #[tokio::test]
    async fn rejects_unknown_timezone() {
        let state = CreateTransactionPageState {
            local_timezone: "Not/AZone".to_owned(),
        };

        let result = get_create_transaction_page(State(state)).await;

        assert!(matches!(result, Err(Error::InvalidTimezoneError(_))));
    }
}
