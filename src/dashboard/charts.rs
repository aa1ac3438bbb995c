//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for financial data:
//! - **Monthly Trend Chart**: Income and expenses per month
//! - **Category Chart**: Total expenses per category
//! - **Budget Chart**: The 50/30/20 budget for each group next to what was spent
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, Emphasis, EmphasisFocus,
        JsFunction, Tooltip, Trigger,
    },
    series::{Line, bar},
};
use maud::{Markup, PreEscaped, html};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    dashboard::aggregation::{BudgetAllocation, MonthlyTotals},
    html::HeadElement,
};

const INCOME_COLOR: &str = "#16a34a";
const EXPENSE_COLOR: &str = "#dc2626";
const BUDGET_COLOR: &str = "#2563eb";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Income and expenses per month as two lines.
pub(super) fn monthly_trend_chart(series: &[MonthlyTotals]) -> Chart {
    let labels: Vec<String> = series.iter().map(|month| month.month.clone()).collect();
    let income: Vec<f64> = series.iter().map(|month| chart_value(month.income)).collect();
    let expenses: Vec<f64> = series
        .iter()
        .map(|month| chart_value(month.expense))
        .collect();

    Chart::new()
        .title(Title::new().text("Monthly Trend").subtext("Income and expenses"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().right("4%"))
        .color(vec![Color::from(INCOME_COLOR), Color::from(EXPENSE_COLOR)])
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(currency_axis())
        .series(Line::new().name("Income").data(income))
        .series(Line::new().name("Expenses").data(expenses))
}

/// Total expenses per category as bars, in category name order.
pub(super) fn category_chart(breakdown: &BTreeMap<String, Decimal>) -> Chart {
    let labels: Vec<String> = breakdown.keys().cloned().collect();
    let values: Vec<f64> = breakdown.values().copied().map(chart_value).collect();

    Chart::new()
        .title(Title::new().text("Expenses by Category"))
        .tooltip(currency_tooltip())
        .color(vec![Color::from(EXPENSE_COLOR)])
        .grid(default_grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .axis_label(AxisLabel::new().rotate(30))
                .data(labels),
        )
        .y_axis(currency_axis())
        .series(bar::Bar::new().name("Expenses").data(values))
}

/// The budget and the amount spent for each 50/30/20 group as grouped bars.
pub(super) fn budget_chart(allocation: &BudgetAllocation) -> Chart {
    let buckets = allocation.buckets();
    let labels: Vec<String> = buckets
        .iter()
        .map(|(transaction_type, _, _)| group_label(transaction_type.as_str()))
        .collect();
    let budgets: Vec<f64> = buckets
        .iter()
        .map(|(_, _, bucket)| chart_value(bucket.budget))
        .collect();
    let spent: Vec<f64> = buckets
        .iter()
        .map(|(_, _, bucket)| chart_value(bucket.spent))
        .collect();

    Chart::new()
        .title(Title::new().text("50/30/20 Budget").subtext("Budget vs. spent"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().right("4%"))
        .color(vec![Color::from(BUDGET_COLOR), Color::from(EXPENSE_COLOR)])
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(currency_axis())
        .series(
            bar::Bar::new()
                .name("Budget")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(budgets),
        )
        .series(
            bar::Bar::new()
                .name("Spent")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(spent),
        )
}

/// The plural label for a budget group, e.g. "Needs".
pub(super) fn group_label(transaction_type: &str) -> String {
    if transaction_type.ends_with('s') {
        transaction_type.to_owned()
    } else {
        format!("{transaction_type}s")
    }
}

fn chart_value(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .top(80)
        .contain_label(true)
}

fn currency_axis() -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .axis_label(AxisLabel::new().formatter(currency_formatter()))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
