//! Table views for dashboard data display.
//!
//! Provides HTML table components for displaying monthly financial summaries.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    dashboard::aggregation::MonthlyTotals,
    html::{TABLE_CELL_STYLE, TABLE_ROW_STYLE, format_currency},
};

// Table cell styles for monthly summary
const TABLE_HEADER_CELL_STYLE: &str = "px-3 py-3 text-center min-w-[100px]";
const TABLE_HEADER_FIRST_CELL_STYLE: &str =
    "px-3 py-3 sticky left-0 bg-gray-100 dark:bg-gray-700 z-10 font-semibold";
const TABLE_STICKY_CELL_STYLE: &str = "px-3 py-4 font-medium text-gray-900 dark:text-white sticky left-0 bg-white dark:bg-gray-800 z-10";
const TABLE_DATA_CELL_STYLE: &str = "text-center whitespace-nowrap";
const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring amounts (green for positive, red for negative).
fn amount_color_class(amount: Decimal) -> &'static str {
    if amount >= Decimal::ZERO {
        TABLE_CELL_GREEN_STYLE
    } else {
        TABLE_CELL_RED_STYLE
    }
}

/// Renders a table with the income, expenses and net income of each month,
/// most recent month first.
///
/// Renders nothing if there are no months.
pub(super) fn monthly_summary_table(series: &[MonthlyTotals]) -> Markup {
    if series.is_empty() {
        return html! {};
    }

    html! {
        div {
            h3 class="text-xl font-semibold mb-4" { "Monthly Summary" }

            div class="overflow-x-auto rounded-lg shadow" {
                table id="monthly-summary" class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class="text-xs text-gray-900 uppercase bg-gray-100 dark:bg-gray-700 dark:text-gray-400" {
                        tr {
                            th scope="col" class={(TABLE_HEADER_FIRST_CELL_STYLE) " text-left"} {
                                "Month"
                            }
                            th scope="col" class={(TABLE_HEADER_CELL_STYLE) " font-semibold"} {
                                "Income"
                            }
                            th scope="col" class={(TABLE_HEADER_CELL_STYLE) " font-semibold"} {
                                "Expenses"
                            }
                            th scope="col" class={(TABLE_HEADER_CELL_STYLE) " font-bold"} {
                                "Net Income"
                            }
                        }
                    }
                    tbody {
                        @for month in series.iter().rev() {
                            @let net_income = month.income - month.expense;

                            tr class=(TABLE_ROW_STYLE) {
                                th scope="row" class={(TABLE_STICKY_CELL_STYLE) " text-left"} {
                                    (month.month)
                                }
                                td class={(TABLE_CELL_STYLE) " " (TABLE_DATA_CELL_STYLE) " " (TABLE_CELL_GREEN_STYLE)} {
                                    (format_currency(month.income))
                                }
                                td class={(TABLE_CELL_STYLE) " " (TABLE_DATA_CELL_STYLE) " " (TABLE_CELL_RED_STYLE)} {
                                    (format_currency(month.expense))
                                }
                                td class={(TABLE_CELL_STYLE) " " (TABLE_DATA_CELL_STYLE) " " (amount_color_class(net_income)) " font-bold"} {
                                    (format_currency(net_income))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
