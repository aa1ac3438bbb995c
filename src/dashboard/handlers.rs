//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for the dashboard page
//! - The route handler for the JSON summary of the same figures
//! - HTML view functions for rendering the dashboard UI

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{
            BudgetAllocation, MonthlyTotals, Totals, compute_budget_allocation,
            compute_category_breakdown, compute_monthly_series, compute_totals,
        },
        cards::{budget_cards_view, metric_cards_view},
        charts::{
            DashboardChart, budget_chart, category_chart, charts_script, charts_view,
            monthly_trend_chart,
        },
        tables::monthly_summary_table,
    },
    endpoints,
    html::{ECHARTS_URL, HeadElement, base, link},
    navigation::NavBar,
    store::{SharedSheetStore, read_ledger},
    transaction::Ledger,
};

/// The state needed for displaying the dashboard page.
#[derive(Clone)]
pub struct DashboardState {
    /// The sheet holding the transactions.
    pub store: SharedSheetStore,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Every figure shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Income, expenses and the balance.
    pub totals: Totals,
    /// Total expenses per category.
    pub category_breakdown: BTreeMap<String, Decimal>,
    /// Income and expenses per month, oldest month first.
    pub monthly_series: Vec<MonthlyTotals>,
    /// Spending against the 50/30/20 budgets.
    pub budget_allocation: BudgetAllocation,
    /// Whether the sheet records the 50/30/20 classification. If not, every
    /// budget group shows nothing spent.
    pub has_classification: bool,
}

impl DashboardSummary {
    fn from_ledger(ledger: &Ledger) -> Self {
        let totals = compute_totals(&ledger.transactions);

        Self {
            totals,
            category_breakdown: compute_category_breakdown(&ledger.transactions),
            monthly_series: compute_monthly_series(&ledger.transactions),
            budget_allocation: compute_budget_allocation(
                &ledger.transactions,
                totals.total_income,
            ),
            has_classification: ledger.has_classification(),
        }
    }
}

fn load_summary(store: &SharedSheetStore) -> Result<DashboardSummary, Error> {
    let ledger = read_ledger(store)
        .inspect_err(|error| tracing::error!("could not read transactions: {error}"))?;

    if ledger.skipped_rows > 0 {
        tracing::warn!(
            "{} malformed rows were left out of the dashboard",
            ledger.skipped_rows
        );
    }

    Ok(DashboardSummary::from_ledger(&ledger))
}

/// Display a page with an overview of the user's finances.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let summary = load_summary(&state.store)?;
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if summary.totals.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    Ok(dashboard_view(nav_bar, &summary).into_response())
}

/// The dashboard figures as JSON.
///
/// Amounts are serialized as strings to keep them exact.
pub async fn get_summary(
    State(state): State<DashboardState>,
) -> Result<Json<DashboardSummary>, Error> {
    load_summary(&state.store).map(Json)
}

/// Creates the dashboard charts from the summary.
///
/// The chart options are serialized to JSON for ECharts consumption.
fn build_dashboard_charts(summary: &DashboardSummary) -> [DashboardChart; 3] {
    [
        DashboardChart {
            id: "monthly-trend-chart",
            options: monthly_trend_chart(&summary.monthly_series).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(&summary.category_breakdown).to_string(),
        },
        DashboardChart {
            id: "budget-chart",
            options: budget_chart(&summary.budget_allocation).to_string(),
        },
    ]
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "Add a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Financial Overview"
            }

            p id="no-data-message"
            {
                "No transactions found. Add some transactions to see your financial overview!"
            }

            p { (new_transaction_link) }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with the metrics, charts, budget and
/// monthly summary.
fn dashboard_view(nav_bar: NavBar<'_>, summary: &DashboardSummary) -> Markup {
    let nav_bar = nav_bar.into_html();
    let charts = build_dashboard_charts(summary);

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (metric_cards_view(&summary.totals))

            (charts_view(&charts))

            (budget_cards_view(
                &summary.budget_allocation,
                summary.totals.total_income,
                summary.has_classification,
            ))

            div class="w-full mb-8"
            {
                (monthly_summary_table(&summary.monthly_series))
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use scraper::{Html, Selector};
    use tempfile::tempdir;
    use time::macros::date;

    use crate::{
        store::{CsvSheetStore, SharedSheetStore, SqliteSheetStore, share},
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
        transaction::{Transaction, TransactionType},
    };

    use super::{DashboardState, get_dashboard_page, get_summary};

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction::build(Decimal::from(1000), date!(2025 - 01 - 01), "January salary")
                .category("Salary")
                .classified_as(TransactionType::Income)
                .finalise(),
            Transaction::build(Decimal::from(600), date!(2025 - 01 - 03), "Rent")
                .category("Housing")
                .classified_as(TransactionType::Need)
                .finalise(),
            Transaction::build(Decimal::from(200), date!(2025 - 02 - 10), "Concert")
                .category("Entertainment")
                .classified_as(TransactionType::Want)
                .finalise(),
        ]
    }

    fn sqlite_store(transactions: &[Transaction]) -> SharedSheetStore {
        let connection = Connection::open_in_memory().unwrap();
        let store = share(SqliteSheetStore::new(connection).unwrap());
        {
            let mut guard = store.lock().unwrap();
            for transaction in transactions {
                guard.append(transaction).unwrap();
            }
        }
        store
    }

    #[tokio::test]
    async fn dashboard_shows_empty_state_without_transactions() {
        let state = DashboardState {
            store: sqlite_store(&[]),
        };

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let message = html
            .select(&Selector::parse("#no-data-message").unwrap())
            .next()
            .expect("No empty state message found");
        assert_eq!(
            message.text().collect::<String>().trim(),
            "No transactions found. Add some transactions to see your financial overview!"
        );
        assert_chart_count(&html, 0);
    }

    #[tokio::test]
    async fn dashboard_displays_metrics_charts_and_budget() {
        let state = DashboardState {
            store: sqlite_store(&sample_transactions()),
        };

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        for chart_id in ["monthly-trend-chart", "category-chart", "budget-chart"] {
            assert_chart_exists(&html, chart_id);
        }
        assert_exists(&html, "#budget-planning");
        assert_exists(&html, "table#monthly-summary");
        assert!(
            html.select(&Selector::parse("#classification-notice").unwrap())
                .next()
                .is_none(),
            "notice should only be shown when the classification column is missing"
        );

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Total Balance"));
        assert!(text.contains("over budget"), "needs spent 600 of a 500 budget");
    }

    #[tokio::test]
    async fn dashboard_reads_legacy_csv_sheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        std::fs::write(
            &path,
            "date,description,amount,category,type\n\
            2025-01-01,Salary,1000,Salary,income\n\
            2025-01-02,Groceries,80,Groceries,expense\n",
        )
        .unwrap();
        let state = DashboardState {
            store: share(CsvSheetStore::open(&path).unwrap()),
        };

        let response = get_dashboard_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_exists(&html, "#classification-notice");
        assert_chart_exists(&html, "budget-chart");
    }

    #[tokio::test]
    async fn dashboard_reports_missing_required_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        std::fs::write(&path, "date,description,amount,type\n").unwrap();
        let state = DashboardState {
            store: share(CsvSheetStore::open(&path).unwrap()),
        };

        let response = get_dashboard_page(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn summary_serializes_aggregates() {
        let state = DashboardState {
            store: sqlite_store(&sample_transactions()),
        };

        let summary = get_summary(State(state)).await.unwrap().0;
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["totals"]["total_income"], "1000");
        assert_eq!(json["totals"]["total_expenses"], "800");
        assert_eq!(json["totals"]["balance"], "200");
        assert_eq!(json["category_breakdown"]["Housing"], "600");
        assert_eq!(json["monthly_series"].as_array().unwrap().len(), 2);
        assert_eq!(json["budget_allocation"]["needs"]["budget"], "500.0");
        assert_eq!(json["has_classification"], true);
    }

    #[track_caller]
    fn assert_exists(html: &Html, selector: &str) {
        assert!(
            html.select(&Selector::parse(selector).unwrap())
                .next()
                .is_some(),
            "No element matching {selector}"
        );
    }

    #[track_caller]
    fn assert_chart_exists(html: &Html, chart_id: &str) {
        assert_exists(html, &format!("div#{chart_id}"));
    }

    #[track_caller]
    fn assert_chart_count(html: &Html, want: usize) {
        let count = html
            .select(&Selector::parse("#charts > div > div").unwrap())
            .count();
        assert_eq!(count, want, "want {want} charts, got {count}");
    }
}
