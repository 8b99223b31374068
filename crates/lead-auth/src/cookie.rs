//! `admin_auth` cookie header helpers.

/// Name of the admin session cookie.
pub const COOKIE_NAME: &str = "admin_auth";

/// `Set-Cookie` value establishing a session.
///
/// The token is percent-encoded so any configured secret is a legal cookie
/// value.
#[must_use]
pub fn session_cookie(token: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{COOKIE_NAME}={}; HttpOnly; Path=/; Max-Age={max_age_secs}; SameSite=Lax",
        urlencoding::encode(token)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session.
#[must_use]
pub fn clear_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Find a cookie by name in one `Cookie` request header and decode it.
#[must_use]
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| {
            let value = value.trim().trim_matches('"');
            urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned())
        })
}

/// The `admin_auth` value across every `Cookie` header of a request.
pub fn session_token<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<String> {
    headers
        .into_iter()
        .find_map(|header| find_cookie(header, COOKIE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn session_cookie_attributes() {
        assert_eq!(
            session_cookie("tok", 604_800, false),
            "admin_auth=tok; HttpOnly; Path=/; Max-Age=604800; SameSite=Lax"
        );
        assert!(session_cookie("tok", 60, true).ends_with("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        assert_eq!(
            clear_cookie(false),
            "admin_auth=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax"
        );
    }

    #[test]
    fn special_characters_survive_round_trip() {
        let token = "a b;c=d";
        let set = session_cookie(token, 10, false);
        let value = set.split(';').next().unwrap();
        assert_eq!(find_cookie(value, COOKIE_NAME).as_deref(), Some(token));
    }

    #[test]
    fn finds_cookie_among_others() {
        let header = "theme=dark; admin_auth=secret-token; _ga=GA1.2";
        assert_eq!(
            find_cookie(header, COOKIE_NAME).as_deref(),
            Some("secret-token")
        );
        assert_eq!(find_cookie(header, "missing"), None);
    }

    #[test]
    fn name_must_match_exactly() {
        assert_eq!(find_cookie("xadmin_auth=1", COOKIE_NAME), None);
    }

    #[test]
    fn session_token_scans_all_headers() {
        let headers = ["theme=dark", "admin_auth=abc"];
        assert_eq!(session_token(headers).as_deref(), Some("abc"));
        assert_eq!(session_token(["theme=dark"]), None);
    }
}
