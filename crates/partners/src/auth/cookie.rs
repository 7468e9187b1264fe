// Session cookie adapter
// Decision: One cookie parser (axum-extra CookieJar) shared by every endpoint
// Decision: Max-Age mirrors the token lifetime so browsers drop the cookie when the token expires

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "bloxion_discord_token";

/// Name of the short-lived cookie holding the OAuth `state` value
pub const OAUTH_STATE_COOKIE: &str = "bloxion_oauth_state";

/// Lifetime of the OAuth state cookie (10 minutes)
pub const OAUTH_STATE_MAX_AGE_SECS: i64 = 10 * 60;

/// Build the session cookie for a token
pub fn session_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// Attach a session token to the response cookies
pub fn attach(jar: CookieJar, token: String, max_age_secs: i64) -> CookieJar {
    jar.add(session_cookie(token, max_age_secs))
}

/// Read the session token from request cookies; None when absent or empty
pub fn extract(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Remove the session cookie
pub fn clear(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Build the OAuth state cookie set before redirecting to Discord
pub fn oauth_state_cookie(state: String) -> Cookie<'static> {
    Cookie::build((OAUTH_STATE_COOKIE, state))
        .path("/api/auth")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(OAUTH_STATE_MAX_AGE_SECS))
        .build()
}

/// Read the OAuth state cookie
pub fn extract_oauth_state(jar: &CookieJar) -> Option<String> {
    jar.get(OAUTH_STATE_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Remove the OAuth state cookie once the callback has consumed it
pub fn clear_oauth_state(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(OAUTH_STATE_COOKIE).path("/api/auth"))
}
