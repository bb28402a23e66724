/// Session cookie and post-login redirect helpers

use crate::error::WebError;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Name of the login session cookie
pub const SESSION_COOKIE: &str = "session";

/// Characters escaped in the `next` query parameter; path separators stay readable
const NEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds the session cookie
///
/// `max_age` is set only for "remember me" logins; otherwise the cookie
/// lasts until the browser closes.
pub fn session_cookie(
    token: &str,
    max_age: Option<i64>,
    secure: bool,
) -> Result<Cookie<'static>, WebError> {
    let mut raw = format!("{}={}; HttpOnly; SameSite=Lax; Path=/", SESSION_COOKIE, token);
    if let Some(seconds) = max_age {
        raw.push_str(&format!("; Max-Age={}", seconds));
    }
    if secure {
        raw.push_str("; Secure");
    }

    Cookie::parse(raw).map_err(|e| WebError::Internal(format!("Invalid session cookie: {}", e)))
}

/// Drops the session cookie from the browser
pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// True if `target` is a same-site path that is safe to redirect to
///
/// Rejects absolute URLs, protocol-relative `//host` forms, the `/\host`
/// form some browsers treat the same way, and anything with control
/// characters.
pub fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.starts_with("/\\")
        && !target.chars().any(char::is_control)
}

/// Login page URL that returns to `target` afterwards
pub fn login_location(target: &str) -> String {
    format!("/login?next={}", utf8_percent_encode(target, NEXT_ENCODE_SET))
}
