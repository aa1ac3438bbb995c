//! Dashboard module
//!
//! Provides an overview page showing the headline totals, charts, the 50/30/20
//! budget and a monthly summary, plus the aggregation behind them.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod tables;

pub use aggregation::{
    BudgetAllocation, BudgetBucket, MonthlyTotals, NEEDS_SHARE, SAVINGS_SHARE, Totals,
    WANTS_SHARE, compute_budget_allocation, compute_category_breakdown, compute_monthly_series,
    compute_totals, is_duplicate,
};
pub use handlers::{DashboardSummary, get_dashboard_page, get_summary};
