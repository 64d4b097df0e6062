//! The page to display when a report or route does not exist.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// The fallback route handler.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    let page = error_view(
        "データが見つかりません",
        "404",
        "データが見つかりません",
        "URLが正しいか確認してください。",
    );

    (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
}
