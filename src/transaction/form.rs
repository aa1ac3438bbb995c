//! The fields of the transaction entry form and the category options partial.

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::core::{MIN_DESCRIPTION_LENGTH, TransactionType},
};

pub(super) struct TransactionFormDefaults {
    pub transaction_type: TransactionType,
    pub date: Date,
}

pub(super) fn transaction_form_fields(defaults: &TransactionFormDefaults) -> Markup {
    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for transaction_type in TransactionType::ALL {
                    @let id = format!("transaction-type-{}", transaction_type.as_str().to_lowercase());

                    div class="flex items-center gap-3"
                    {
                        input
                            name="transaction_type"
                            id=(id)
                            type="radio"
                            value=(transaction_type.as_str())
                            checked[transaction_type == defaults.transaction_type]
                            required
                            tabindex="0"
                            hx-get=(endpoints::CATEGORIES_API)
                            hx-target="#category"
                            hx-swap="outerHTML"
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for=(id)
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (transaction_type.as_str())
                        }
                    }
                }
            }
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            (category_select(defaults.transaction_type))
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                minlength=(MIN_DESCRIPTION_LENGTH)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// The category dropdown for `transaction_type`.
///
/// The element is swapped out whole when the selected transaction type changes.
fn category_select(transaction_type: TransactionType) -> Markup {
    html! {
        select
            name="category"
            id="category"
            required
            class=(FORM_TEXT_INPUT_STYLE)
        {
            @for category in transaction_type.categories() {
                option value=(category) { (category) }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryOptionsQuery {
    pub transaction_type: TransactionType,
}

/// Renders the category dropdown for the transaction type in the query.
pub async fn get_category_options(Query(query): Query<CategoryOptionsQuery>) -> Response {
    category_select(query.transaction_type).into_response()
}
