//! The endpoint URIs.
//!
//! For endpoints that take parameters, e.g., '/{politician_id}/{year}', use [format_endpoint].

/// The root route which redirects to the report index.
pub const ROOT: &str = "/";
/// The page that lists every available report.
pub const REPORTS_VIEW: &str = "/reports";
/// The public page for one year of a politician's accounting reports.
pub const POLITICIAN_REPORT_VIEW: &str = "/{politician_id}/{year}";
/// The page for one year of a politician's uniformed accounting reports.
pub const UNIFORMED_REPORT_VIEW: &str = "/uniformed/{politician_id}/{year}";
/// The page for an election finance report.
pub const ELECTION_FINANCE_VIEW: &str = "/election-finance/{name}";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for the summary of an election finance report as JSON.
pub const ELECTION_FINANCE_SUMMARY_API: &str = "/api/election-finance/{name}/summary";
/// The route for logging in a viewer.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out.
pub const LOG_OUT: &str = "/log_out";

/// Replace the parameters in `endpoint_path` with `values`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/{politician_id}/{year}', '{politician_id}'
/// and '{year}' are the parameters.
///
/// Parameters without a matching value, and values without a matching
/// parameter, are left as is and ignored respectively.
pub fn format_endpoint(endpoint_path: &str, values: &[&str]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut values = values.iter();
    let mut rest = endpoint_path;

    while let Some(param_start) = rest.find('{') {
        let Some(param_length) = rest[param_start..].find('}') else {
            break;
        };
        let param_end = param_start + param_length + 1;

        formatted.push_str(&rest[..param_start]);

        match values.next() {
            Some(value) => formatted.push_str(value),
            None => formatted.push_str(&rest[param_start..param_end]),
        }

        rest = &rest[param_end..];
    }

    formatted.push_str(rest);
    formatted
}
