//! Implements a struct that holds the state of the REST server.

use std::path::PathBuf;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{PasswordHash, auth::DEFAULT_COOKIE_DURATION, data::DataSource};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// The hash of the shared password for viewing restricted reports.
    pub viewer_password_hash: PasswordHash,

    /// Where the report files are read from.
    pub data: DataSource,
}

impl AppState {
    /// Create a new [AppState] that reads reports from `data_dir`.
    pub fn new(
        data_dir: impl Into<PathBuf>,
        cookie_secret: &str,
        viewer_password_hash: PasswordHash,
    ) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            viewer_password_hash,
            data: DataSource::new(data_dir),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<AppState> for DataSource {
    fn from_ref(state: &AppState) -> Self {
        state.data.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
