//! Polimoney visualises Japanese political funding reports.
//!
//! This library provides a web server that directly serves HTML pages for
//! election campaign finance reports and yearly political organisation
//! accounting reports, along with the transaction aggregator that breaks the
//! reports down for the charts on those pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod app_state;
mod auth;
mod category;
mod charts;
mod data;
mod election_finance;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod password;
mod politician_report;
mod reports_page;
mod routing;
mod transaction;
mod transaction_section;

#[cfg(test)]
mod test_utils;

pub use aggregation::{
    Aggregation, CategoryAggregate, GroupedTransactions, Grouping, PALETTE, PRIVATE_LABEL,
    PUBLIC_LABEL, Totals, aggregate, assign_colors,
};
pub use app_state::AppState;
pub use category::{Category, TransactionKind, categorize_transaction_type, category_label};
pub use data::{DataSource, ReportKind, ReportListing};
pub use election_finance::{CategorySummary, EfData, EfMetadata, summarize_by_category};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordHash, ValidatedPassword};
pub use politician_report::{AccountingReports, LedgerEntry, Profile, Report, ReportData};
pub use routing::build_router;
pub use transaction::{Transaction, sort_newest_first};

use crate::{internal_server_error::InternalServerError, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client provided an incorrect password or a token that could not
    /// be read.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The auth token cookie is missing from the cookie jar in the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// The auth token has expired.
    #[error("the log in session has expired")]
    SessionExpired,

    /// Adding the cookie duration to the current time overflowed.
    #[error("could not compute the cookie expiry")]
    InvalidExpiry,

    /// The operator provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The configured viewer password hash is not a bcrypt hash.
    #[error("the password hash is not a valid bcrypt hash")]
    InvalidPasswordHash,

    /// The requested report was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// politician ID, year or report name are correct.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A report name or politician ID contained characters other than ASCII
    /// letters, digits and hyphens.
    #[error("invalid report ID \"{0}\"")]
    InvalidReportId(String),

    /// A report file could not be read.
    #[error("could not read report data: {0}")]
    DataReadError(String),

    /// A report file is not valid JSON or does not have the expected shape.
    #[error("could not parse report data: {0}")]
    JSONDeserializationError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            // The cause has already been logged where the error was created.
            Error::NotFound
            | Error::InvalidReportId(_)
            | Error::DataReadError(_)
            | Error::JSONDeserializationError(_) => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
