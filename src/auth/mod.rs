//! Viewer authentication with a single shared password and private cookies.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod token;

pub(crate) use cookie::is_signed_in;
pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::auth_guard;
pub(super) use token::Token;

#[cfg(test)]
pub use cookie::COOKIE_TOKEN;
