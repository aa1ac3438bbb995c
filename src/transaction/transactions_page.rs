//! Defines the route handler for the page that displays transactions as a table.

use std::collections::BTreeSet;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error, endpoints,
    html::{
        BADGE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency, link,
    },
    navigation::NavBar,
    store::{SharedSheetStore, read_ledger},
    transaction::{Transaction, TransactionKind},
};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The state needed for the transactions page.
#[derive(Clone)]
pub struct TransactionsViewState {
    /// The sheet holding the transactions.
    pub store: SharedSheetStore,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The filters selected on the transactions page.
///
/// Both filters are multi-select and repeat their key in the query string,
/// e.g. `?filtered=true&category=Groceries&category=Rent&type=expense`.
/// Until the filter form has been submitted (`filtered` is absent), every
/// category and type counts as selected.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsFilter {
    #[serde(default)]
    pub filtered: bool,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default, rename = "type")]
    pub kind: Vec<TransactionKind>,
}

impl TransactionsFilter {
    fn includes_category(&self, category: &str) -> bool {
        !self.filtered || self.category.iter().any(|selected| selected == category)
    }

    fn includes_kind(&self, kind: TransactionKind) -> bool {
        !self.filtered || self.kind.contains(&kind)
    }

    fn matches(&self, transaction: &Transaction) -> bool {
        self.includes_category(&transaction.category) && self.includes_kind(transaction.kind)
    }
}

/// The transactions that pass `filter`, most recent first.
///
/// Transactions on the same date keep their order in the sheet.
fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionsFilter,
) -> Vec<&'a Transaction> {
    let mut rows: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

/// The URL of the transactions page showing only `category`.
fn category_filter_url(category: &str) -> String {
    let query = serde_urlencoded::to_string([("filtered", "true"), ("category", category)])
        .unwrap_or_default();

    format!("{}?{query}", endpoints::TRANSACTIONS_VIEW)
}

/// Render the user's transactions, filtered by category and type.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(filter): Query<TransactionsFilter>,
) -> Result<Response, Error> {
    let ledger = read_ledger(&state.store)
        .inspect_err(|error| tracing::error!("could not read transactions: {error}"))?;

    let categories: BTreeSet<&str> = ledger
        .transactions
        .iter()
        .map(|transaction| transaction.category.as_str())
        .collect();
    let rows = filter_transactions(&ledger.transactions, &filter);

    Ok(transactions_view(&rows, ledger.transactions.len(), &categories, &filter).into_response())
}

fn transactions_view(
    rows: &[&Transaction],
    total_count: usize,
    categories: &BTreeSet<&str>,
    filter: &TransactionsFilter,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-6"
            {
                div class="flex flex-wrap items-center justify-between gap-4"
                {
                    h2 class="text-2xl font-bold" { "Transaction History" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                (filter_form(categories, filter))

                p id="transaction-count" class="text-sm text-gray-600 dark:text-gray-400"
                {
                    "Showing " (rows.len()) " of " (total_count) " transactions"
                }

                div class="overflow-x-auto rounded-lg shadow"
                {
                    table id="transactions" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Classification" }
                                th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                            }
                        }

                        tbody
                        {
                            @for transaction in rows {
                                (transaction_row_view(transaction))
                            }

                            @if rows.is_empty() {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td colspan="6" class={ (TABLE_CELL_STYLE) " text-center" }
                                    {
                                        @if total_count == 0 {
                                            "No transactions found. "
                                            (link(endpoints::NEW_TRANSACTION_VIEW, "Add a transaction"))
                                            " to get started."
                                        } @else {
                                            "No transactions match the selected filters."
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

fn filter_form(categories: &BTreeSet<&str>, filter: &TransactionsFilter) -> Markup {
    html! {
        form
            id="transaction-filters"
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="space-y-3 p-4 rounded-lg bg-white dark:bg-gray-800 shadow"
        {
            input type="hidden" name="filtered" value="true";

            fieldset
            {
                legend class="font-semibold mb-2" { "Categories" }

                div class="flex flex-wrap gap-4"
                {
                    @for category in categories {
                        label class="inline-flex items-center gap-2"
                        {
                            input
                                type="checkbox"
                                name="category"
                                value=(category)
                                checked[filter.includes_category(category)];
                            (category)
                        }
                    }
                }
            }

            fieldset
            {
                legend class="font-semibold mb-2" { "Type" }

                div class="flex flex-wrap gap-4"
                {
                    @for kind in TransactionKind::ALL {
                        label class="inline-flex items-center gap-2"
                        {
                            input
                                type="checkbox"
                                name="type"
                                value=(kind)
                                checked[filter.includes_kind(kind)];
                            (kind_label(kind))
                        }
                    }
                }
            }

            div class="flex items-center gap-4"
            {
                button type="submit" class={ (BUTTON_PRIMARY_STYLE) " max-w-40" } { "Apply Filters" }

                @if filter.filtered {
                    a
                        href=(endpoints::TRANSACTIONS_VIEW)
                        class={ (BUTTON_SECONDARY_STYLE) " max-w-40 mb-0 text-center" }
                    {
                        "Clear Filters"
                    }
                }
            }
        }
    }
}

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    }
}

fn amount_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Expense => "text-red-700 dark:text-red-300",
        TransactionKind::Income => "text-green-700 dark:text-green-300",
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let (description, tooltip) = format_description(&transaction.description);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
            {
                time datetime=(transaction.date) { (transaction.date) }
            }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class=(TABLE_CELL_STYLE)
            {
                a href=(category_filter_url(&transaction.category)) class=(BADGE_STYLE)
                {
                    (transaction.category)
                }
            }
            td class=(TABLE_CELL_STYLE) { (kind_label(transaction.kind)) }
            td class=(TABLE_CELL_STYLE)
            {
                @match transaction.transaction_type {
                    Some(transaction_type) => { (transaction_type) }
                    None => { span class="text-gray-400 dark:text-gray-500" { "-" } }
                }
            }
            td class={ (TABLE_CELL_STYLE) " text-right " (amount_class(transaction.kind)) }
            {
                (format_currency(transaction.amount))
            }
        }
    }
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(description))
    }
}
