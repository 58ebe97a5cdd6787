use http::HeaderMap;

pub const SESSION_COOKIE: &str = "admin_logged_in";
pub const SESSION_MAX_AGE_SECS: i64 = 6 * 60 * 60;

/// Returns the value of cookie `name` from every `Cookie` header on the request.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
}

pub fn is_admin_session(headers: &HeaderMap) -> bool {
    read_cookie(headers, SESSION_COOKIE).as_deref() == Some("true")
}

pub fn session_cookie(secure: bool) -> String {
    build_cookie("true", SESSION_MAX_AGE_SECS, secure)
}

pub fn cleared_session_cookie(secure: bool) -> String {
    build_cookie("", 0, secure)
}

fn build_cookie(value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, value, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(raw: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for value in raw {
            map.append(http::header::COOKIE, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn finds_cookie_among_others() {
        let map = headers(&["theme=dark; admin_logged_in=true; lang=tr"]);
        assert_eq!(read_cookie(&map, "lang").as_deref(), Some("tr"));
        assert!(is_admin_session(&map));
    }

    #[test]
    fn reads_across_multiple_headers() {
        let map = headers(&["theme=dark", "admin_logged_in=true"]);
        assert!(is_admin_session(&map));
    }

    #[test]
    fn rejects_other_values() {
        assert!(!is_admin_session(&headers(&["admin_logged_in=false"])));
        assert!(!is_admin_session(&headers(&["admin_logged_in="])));
        assert!(!is_admin_session(&headers(&["not_admin_logged_in=true"])));
        assert!(!is_admin_session(&HeaderMap::new()));
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie(false);
        assert!(cookie.starts_with("admin_logged_in=true;"));
        assert!(cookie.contains("Max-Age=21600"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Secure"));
        assert!(session_cookie(true).ends_with("; Secure"));
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        assert!(cleared_session_cookie(false).contains("Max-Age=0"));
    }
}
