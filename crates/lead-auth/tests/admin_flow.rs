use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use lead_auth::{AdminAuth, AuthError, GateDecision};
use lead_config::{AdminConfig, SessionMode};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 2, 12, 0, 0).unwrap()
}

fn auth(mode: SessionMode) -> AdminAuth {
    AdminAuth::new(AdminConfig {
        email: "owner@agency.example".into(),
        password: "hunter22".into(),
        auth_token: "tok-123".into(),
        session_mode: mode,
        ..AdminConfig::default()
    })
}

/// `name=value` part of a `Set-Cookie` header, usable as a `Cookie` header.
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

#[test]
fn static_login_sets_shared_secret_cookie() {
    let set_cookie = auth(SessionMode::Static)
        .login("owner@agency.example", "hunter22", now())
        .unwrap();
    assert_eq!(
        set_cookie,
        "admin_auth=tok-123; HttpOnly; Path=/; Max-Age=604800; SameSite=Lax"
    );
}

#[test]
fn wrong_password_yields_no_cookie() {
    let result = auth(SessionMode::Static).login("owner@agency.example", "nope", now());
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[rstest]
#[case::static_mode(SessionMode::Static)]
#[case::signed_mode(SessionMode::Signed)]
fn logged_in_cookie_passes_gate(#[case] mode: SessionMode) {
    let auth = auth(mode);
    let set_cookie = auth
        .login("owner@agency.example", "hunter22", now())
        .unwrap();
    let header = format!("theme=light; {}", cookie_pair(&set_cookie));

    assert_eq!(
        auth.gate("/admin", [header.as_str()], now()),
        GateDecision::Allow
    );
}

#[rstest]
#[case::static_mode(SessionMode::Static)]
#[case::signed_mode(SessionMode::Signed)]
fn missing_and_wrong_cookies_redirect(#[case] mode: SessionMode) {
    let auth = auth(mode);
    assert_eq!(
        auth.gate("/admin", std::iter::empty::<&str>(), now()),
        GateDecision::RedirectToLogin
    );
    assert_eq!(
        auth.gate("/admin/leads", ["admin_auth=guess"], now()),
        GateDecision::RedirectToLogin
    );
}

#[test]
fn login_page_and_api_are_never_gated() {
    let auth = auth(SessionMode::Static);
    assert_eq!(
        auth.gate("/admin/login", std::iter::empty::<&str>(), now()),
        GateDecision::Allow
    );
    assert_eq!(
        auth.gate("/api/submissions/save", std::iter::empty::<&str>(), now()),
        GateDecision::Allow
    );
}

#[test]
fn signed_session_expires_after_max_age() {
    let auth = auth(SessionMode::Signed);
    let set_cookie = auth
        .login("owner@agency.example", "hunter22", now())
        .unwrap();
    let header = cookie_pair(&set_cookie);

    let later = now() + TimeDelta::days(8);
    assert!(matches!(
        auth.authenticate([header.as_str()], later),
        Err(AuthError::SessionExpired)
    ));
    assert_eq!(
        auth.gate("/admin", [header.as_str()], later),
        GateDecision::RedirectToLogin
    );
}

#[test]
fn logout_cookie_clears_session() {
    let cleared = auth(SessionMode::Static).logout_cookie();
    assert!(cleared.starts_with("admin_auth=;"));
    assert!(cleared.contains("Max-Age=0"));
}

#[test]
fn authenticate_without_cookie_is_missing_session() {
    let result = auth(SessionMode::Static).authenticate(["theme=dark"], now());
    assert!(matches!(result, Err(AuthError::MissingSession)));
}
