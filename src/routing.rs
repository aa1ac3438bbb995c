//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    dashboard::{get_dashboard_page, get_summary},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, get_category_options, get_create_transaction_page,
        get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(endpoints::CATEGORIES_API, get(get_category_options))
        .route(endpoints::SUMMARY_API, get(get_summary))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, build_router, endpoints, store::SqliteSheetStore};

    fn get_test_server() -> TestServer {
        let store = SqliteSheetStore::new(Connection::open_in_memory().unwrap()).unwrap();
        let state = AppState::new(store, "Etc/UTC").unwrap();

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn recorded_transaction_shows_on_dashboard_and_summary() {
        let server = get_test_server();
        let form = [
            ("transaction_type", "Income"),
            ("category", "Salary"),
            ("amount", "1000"),
            ("date", "2025-01-01"),
            ("description", "January salary"),
        ];

        let response = server.post(endpoints::TRANSACTIONS_API).form(&form).await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(response.header("hx-redirect"), endpoints::DASHBOARD_VIEW);

        let dashboard = server.get(endpoints::DASHBOARD_VIEW).await;
        dashboard.assert_status_ok();
        assert!(dashboard.text().contains("Total Income"));

        let summary = server.get(endpoints::SUMMARY_API).await;
        summary.assert_status_ok();
        let json = summary.json::<serde_json::Value>();
        assert_eq!(json["totals"]["total_income"], "1000");
        assert_eq!(json["totals"]["count"], 1);

        let transactions = server.get(endpoints::TRANSACTIONS_VIEW).await;
        assert!(transactions.text().contains("January salary"));
    }

    #[tokio::test]
    async fn submitting_the_same_transaction_twice_conflicts() {
        let server = get_test_server();
        let form = [
            ("transaction_type", "Want"),
            ("category", "Dining Out"),
            ("amount", "45.50"),
            ("date", "2025-01-02"),
            ("description", "Pizza night"),
        ];

        server.post(endpoints::TRANSACTIONS_API).form(&form).await;
        let response = server.post(endpoints::TRANSACTIONS_API).form(&form).await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn filters_transactions_with_repeated_query_keys() {
        let server = get_test_server();
        for (transaction_type, category, description) in [
            ("Need", "Housing", "Rent"),
            ("Want", "Travel", "Weekend away"),
        ] {
            let form = [
                ("transaction_type", transaction_type),
                ("category", category),
                ("amount", "300"),
                ("date", "2025-01-05"),
                ("description", description),
            ];
            server.post(endpoints::TRANSACTIONS_API).form(&form).await;
        }

        let response = server
            .get(&format!(
                "{}?filtered=true&category=Housing&type=expense",
                endpoints::TRANSACTIONS_VIEW
            ))
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("Rent"));
        assert!(!text.contains("Weekend away"));
    }

    #[tokio::test]
    async fn category_options_follow_transaction_type() {
        let server = get_test_server();

        let response = server
            .get(endpoints::CATEGORIES_API)
            .add_query_param("transaction_type", "Income")
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Freelance"));
        assert!(!response.text().contains("Groceries"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        server
            .get("/does-not-exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
