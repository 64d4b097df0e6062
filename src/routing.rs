//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{auth_guard, get_log_in_page, get_log_out, post_log_in},
    election_finance::{get_election_finance_page, get_election_finance_summary},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    politician_report::{get_politician_report_page, get_uniformed_report_page},
    reports_page::get_reports_page,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(
            endpoints::POLITICIAN_REPORT_VIEW,
            get(get_politician_report_page),
        )
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(
            endpoints::UNIFORMED_REPORT_VIEW,
            get(get_uniformed_report_page),
        )
        .route(
            endpoints::ELECTION_FINANCE_VIEW,
            get(get_election_finance_page),
        )
        .route(
            endpoints::ELECTION_FINANCE_SUMMARY_API,
            get(get_election_finance_summary),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the report list.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::REPORTS_VIEW)
}

#[cfg(test)]
mod router_tests {
    use std::path::Path;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use tempfile::TempDir;

    use crate::{AppState, PasswordHash, auth::COOKIE_TOKEN, endpoints};

    use super::build_router;

    const EF_JSON: &str = r#"{
        "metadata": { "date": "2024-10-27", "title": "テスト選挙", "name": "山田太郎" },
        "transactions": [
            { "data_id": "1", "category": "income", "date": null, "price": 1000, "type": "寄附" }
        ]
    }"#;

    const POLITICIAN_JSON: &str = r#"{
        "id": "taro",
        "latestReportId": "taro-2023",
        "profile": { "name": "山田太郎" },
        "data": [ { "report": { "id": "taro-2023", "year": 2023 } } ]
    }"#;

    fn write(root: &Path, relative_path: &str, contents: &str) {
        let path = root.join(relative_path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn get_test_server() -> (TestServer, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "election-finance/ef-demo.json", EF_JSON);
        write(dir.path(), "politicians/taro.json", POLITICIAN_JSON);
        write(dir.path(), "uniformed/taro.json", POLITICIAN_JSON);

        let state = AppState::new(
            dir.path(),
            "test secret",
            PasswordHash::new_unchecked(&bcrypt::hash("okon", 4).unwrap()),
        );
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        (server, dir)
    }

    #[tokio::test]
    async fn root_redirects_to_reports() {
        let (server, _dir) = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::REPORTS_VIEW);
    }

    #[tokio::test]
    async fn public_pages_are_served_without_log_in() {
        let (server, _dir) = get_test_server();

        server.get(endpoints::REPORTS_VIEW).await.assert_status_ok();
        server.get("/taro/2023").await.assert_status_ok();
    }

    #[tokio::test]
    async fn unknown_report_is_not_found() {
        let (server, _dir) = get_test_server();

        let response = server.get("/hanako/2023").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("データが見つかりません"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (server, _dir) = get_test_server();

        server
            .get("/no/such/page/here")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn protected_pages_redirect_to_log_in() {
        let (server, _dir) = get_test_server();

        for path in [
            "/election-finance/demo",
            "/api/election-finance/demo/summary",
            "/uniformed/taro/2023",
        ] {
            let response = server.get(path).await;

            response.assert_status_see_other();
            let expected_query = serde_urlencoded::to_string([("redirect_url", path)]).unwrap();
            assert_eq!(
                response.header("location"),
                format!("{}?{}", endpoints::LOG_IN_VIEW, expected_query)
            );
        }
    }

    #[tokio::test]
    async fn log_in_unlocks_protected_pages() {
        let (server, _dir) = get_test_server();

        let response = server
            .post(endpoints::LOG_IN_API)
            .form(&[("password", "okon")])
            .await;
        response.assert_status_see_other();
        let token_cookie = response.cookie(COOKIE_TOKEN);

        server
            .get("/election-finance/demo")
            .add_cookie(token_cookie.clone())
            .await
            .assert_status_ok();
        server
            .get("/uniformed/taro/2023")
            .add_cookie(token_cookie.clone())
            .await
            .assert_status_ok();

        let summary = server
            .get("/api/election-finance/demo/summary")
            .add_cookie(token_cookie)
            .await;
        summary.assert_status_ok();
        let json: serde_json::Value = summary.json();
        assert_eq!(json["totals"]["totalIncome"], 1000);
    }

    #[tokio::test]
    async fn invalid_report_name_is_not_found_after_log_in() {
        let (server, _dir) = get_test_server();
        let token_cookie = server
            .post(endpoints::LOG_IN_API)
            .form(&[("password", "okon")])
            .await
            .cookie(COOKIE_TOKEN);

        server
            .get("/election-finance/missing")
            .add_cookie(token_cookie)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
