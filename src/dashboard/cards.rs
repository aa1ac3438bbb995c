//! Card components for the headline metrics and the 50/30/20 budget.
//!
//! Provides card-based views showing:
//! - Total balance, income and expenses
//! - Spending against the budget for needs, wants and savings

use maud::{Markup, html};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    dashboard::{
        aggregation::{BudgetAllocation, BudgetBucket, Totals},
        charts::group_label,
    },
    html::format_currency,
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";
const GREEN_TEXT_STYLE: &str = "text-green-600 dark:text-green-400";
const RED_TEXT_STYLE: &str = "text-red-600 dark:text-red-400";

/// Formats a percentage value, avoiding "-0%" display.
fn format_percentage(value: f64) -> String {
    let rounded = value.round();
    if rounded.abs() < 0.5 {
        "0".to_string()
    } else {
        format!("{:.0}", rounded)
    }
}

fn amount_color_class(amount: Decimal) -> &'static str {
    if amount >= Decimal::ZERO {
        GREEN_TEXT_STYLE
    } else {
        RED_TEXT_STYLE
    }
}

/// Renders the total balance, income and expense cards.
pub(super) fn metric_cards_view(totals: &Totals) -> Markup {
    html! {
        section class="w-full mx-auto mb-8" {
            div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                (metric_card("Total Balance", totals.balance, amount_color_class(totals.balance)))
                (metric_card("Total Income", totals.total_income, GREEN_TEXT_STYLE))
                (metric_card("Total Expenses", totals.total_expenses, RED_TEXT_STYLE))
            }
        }
    }
}

fn metric_card(label: &str, amount: Decimal, color_class: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) aria-label=(format!("{label}: {}", format_currency(amount))) {
            h4 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-2" {
                (label)
            }
            div class={"text-3xl font-bold " (color_class)} {
                (format_currency(amount))
            }
        }
    }
}

/// Renders the budget planning section with one card per 50/30/20 group.
///
/// When the sheet has no classification column the cards are still shown, with
/// nothing spent, alongside a notice explaining why.
pub(super) fn budget_cards_view(
    allocation: &BudgetAllocation,
    total_income: Decimal,
    has_classification: bool,
) -> Markup {
    html! {
        section id="budget-planning" class="w-full mx-auto mt-8 mb-8" {
            div class="flex justify-between items-baseline mb-4" {
                h3 class="text-xl font-semibold" {
                    "Budget Planning"
                }
                span class="text-sm text-gray-600 dark:text-gray-400" {
                    "50/30/20 rule"
                }
            }

            @if !has_classification {
                p
                    id="classification-notice"
                    class="mb-4 p-4 text-sm rounded-lg text-yellow-800 bg-yellow-50
                        dark:bg-gray-800 dark:text-yellow-300"
                {
                    "The transactions sheet has no transaction_type column, so spending \
                    cannot be split into needs, wants and savings. Add the column to \
                    the sheet to track your budget."
                }
            }

            div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                @for (transaction_type, share, bucket) in allocation.buckets() {
                    (budget_card(
                        &group_label(transaction_type.as_str()),
                        share,
                        bucket,
                        total_income,
                    ))
                }
            }
        }
    }
}

fn budget_card(label: &str, share: Decimal, bucket: &BudgetBucket, total_income: Decimal) -> Markup {
    let remaining = bucket.remaining();
    let target_percent = (share * Decimal::ONE_HUNDRED).to_f64().unwrap_or_default();
    let share_of_income = bucket.share_of_income(total_income);
    let share_style = if share_of_income > target_percent {
        RED_TEXT_STYLE
    } else {
        GREEN_TEXT_STYLE
    };

    html! {
        div class={(CARD_STYLE) " flex flex-col justify-between"} {
            div {
                h4 class="text-lg font-semibold mb-3" {
                    (label) " (" (format_percentage(target_percent)) "%)"
                }

                div class="text-3xl font-bold mb-1" {
                    (format_currency(bucket.spent))
                }

                div class="text-sm text-gray-600 dark:text-gray-400 mb-2" {
                    "of " (format_currency(bucket.budget)) " budget"
                }

                (progress_bar(bucket.percent_used))
            }

            div class="mt-3 space-y-1" {
                div class={"text-sm font-medium " (amount_color_class(remaining))} {
                    @if remaining < Decimal::ZERO {
                        (format_currency(remaining.abs())) " over budget"
                    } @else {
                        (format_currency(remaining)) " remaining"
                    }
                }
                div class={"text-sm " (share_style)} {
                    (format_percentage(share_of_income)) "% of income (target "
                    (format_percentage(target_percent)) "%)"
                }
            }
        }
    }
}

/// Renders a horizontal progress bar for the percentage of a budget used.
fn progress_bar(percentage: f64) -> Markup {
    let clamped = percentage.clamp(0.0, 100.0);

    // Ensure minimum 3% width so rounded corners are visible
    let display_percentage = if clamped > 0.0 && clamped < 3.0 {
        3.0
    } else {
        clamped
    };
    let bar_style = if clamped >= 100.0 {
        "bg-red-600 dark:bg-red-500"
    } else {
        "bg-blue-600 dark:bg-blue-500"
    };

    html! {
        div
            class="w-full bg-gray-200 dark:bg-gray-700 rounded-full h-2.5 mb-2"
            role="progressbar"
            aria-valuenow=(format_percentage(clamped))
            aria-valuemin="0"
            aria-valuemax="100"
        {
            @if clamped > 0.0 {
                div
                    class={(bar_style) " h-2.5 rounded-full transition-all"}
                    style=(format!("width: {:.1}%", display_percentage))
                {}
            }
        }
    }
}
