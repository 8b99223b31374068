//! Request-time guard for the `/admin` area.

/// Login page; reachable without a session.
pub const LOGIN_PATH: &str = "/admin/login";

/// Whether `path` needs an admin session.
///
/// Covers `/admin` and everything below it except the login page.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    let in_admin = path == "/admin" || path.starts_with("/admin/");
    let is_login = path == LOGIN_PATH || path == "/admin/login/";
    in_admin && !is_login
}

/// Outcome of the gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Serve the request.
    Allow,
    /// Send the browser to the login page.
    RedirectToLogin,
}
