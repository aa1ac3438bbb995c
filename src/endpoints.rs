//! The endpoint URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page with the headline metrics, charts and budget.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for listing and filtering transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for recording a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to record a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for the category options of a transaction type.
pub const CATEGORIES_API: &str = "/api/categories";
/// The route for the aggregated figures as JSON.
pub const SUMMARY_API: &str = "/api/summary";
