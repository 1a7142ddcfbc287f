use chrono::{DateTime, Duration, Utc};

/// Name of the cookie that carries the bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// Companion cookie recording which sign-in flow issued the token.
pub const PERSISTENCE_COOKIE: &str = "token_persistence";

/// How long a freshly issued token should be kept by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPersistence {
    /// Sign-in from the login page: one hour.
    #[default]
    SessionLogin,
    /// Remembered sign-in: seven days.
    Persistent,
}

impl SessionPersistence {
    #[must_use]
    pub fn lifetime(self) -> Duration {
        match self {
            SessionPersistence::SessionLogin => Duration::hours(1),
            SessionPersistence::Persistent => Duration::days(7),
        }
    }

    #[must_use]
    pub fn as_cookie(self) -> &'static str {
        match self {
            SessionPersistence::SessionLogin => "session",
            SessionPersistence::Persistent => "persistent",
        }
    }
}

/// Bearer token plus expiry, mirrored from the `token` cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    expires_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn issue(token: impl Into<String>, persistence: SessionPersistence, now: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at: now + persistence.lifetime(),
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    #[must_use]
    pub fn bearer_header(&self) -> String {
        bearer_header(&self.token)
    }
}

#[must_use]
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Extract the token from an `Authorization` header value.
///
/// The header must be exactly two space-separated parts, the first being
/// `Bearer`.
#[must_use]
pub fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    let scheme = parts.next()?;
    let token = parts.next()?;
    if scheme != "Bearer" || token.is_empty() || parts.next().is_some() {
        return None;
    }
    Some(token)
}

/// `document.cookie` assignment that stores the token.
#[must_use]
pub fn session_cookie(token: &str, persistence: SessionPersistence, secure: bool) -> String {
    set_cookie(TOKEN_COOKIE, token, persistence, secure)
}

/// `document.cookie` assignment that records the flow, with the token's lifetime.
#[must_use]
pub fn persistence_cookie(persistence: SessionPersistence, secure: bool) -> String {
    set_cookie(PERSISTENCE_COOKIE, persistence.as_cookie(), persistence, secure)
}

fn set_cookie(name: &str, value: &str, persistence: SessionPersistence, secure: bool) -> String {
    let max_age = persistence.lifetime().num_seconds();
    let mut cookie = format!("{name}={value}; Max-Age={max_age}; Path=/; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `document.cookie` assignment that removes the token.
#[must_use]
pub fn clear_session_cookie() -> String {
    format!("{TOKEN_COOKIE}=; Max-Age=0; Path=/; SameSite=Lax")
}

#[must_use]
pub fn clear_persistence_cookie() -> String {
    format!("{PERSISTENCE_COOKIE}=; Max-Age=0; Path=/; SameSite=Lax")
}

/// Find the token in a `Cookie` header or `document.cookie` string.
#[must_use]
pub fn token_from_cookies(cookies: &str) -> Option<String> {
    cookie_value(cookies, TOKEN_COOKIE)
}

/// Flow recorded next to the token; the one-hour flow when unknown.
#[must_use]
pub fn persistence_from_cookies(cookies: &str) -> SessionPersistence {
    match cookie_value(cookies, PERSISTENCE_COOKIE).as_deref() {
        Some("persistent") => SessionPersistence::Persistent,
        _ => SessionPersistence::SessionLogin,
    }
}

fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn bearer_shape_is_strict() {
        assert_eq!(parse_bearer("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("bearer abc"), None);
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer a b"), None);
        assert_eq!(parse_bearer("Token abc"), None);
    }

    #[test]
    fn session_lifetimes() {
        let now = fixed_now();
        let short = Session::issue("t", SessionPersistence::SessionLogin, now);
        let long = Session::issue("t", SessionPersistence::Persistent, now);
        assert_eq!(short.expires_at() - now, Duration::hours(1));
        assert_eq!(long.expires_at() - now, Duration::days(7));
        assert!(!short.is_expired(now));
        assert!(short.is_expired(now + Duration::hours(1)));
        assert_eq!(short.bearer_header(), "Bearer t");
    }

    #[test]
    fn cookie_round_trip() {
        let cookie = session_cookie("abc.def", SessionPersistence::Persistent, true);
        assert!(cookie.starts_with("token=abc.def; Max-Age=604800"));
        assert!(cookie.ends_with("; Secure"));

        let jar = "theme=dark; token=abc.def; other=1";
        assert_eq!(token_from_cookies(jar), Some("abc.def".to_owned()));
        assert_eq!(token_from_cookies("token="), None);
        assert_eq!(token_from_cookies("theme=dark"), None);
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn persistence_cookie_follows_the_token() {
        let cookie = persistence_cookie(SessionPersistence::SessionLogin, false);
        assert_eq!(
            cookie,
            "token_persistence=session; Max-Age=3600; Path=/; SameSite=Lax"
        );
        let jar = "token=abc; token_persistence=persistent";
        assert_eq!(persistence_from_cookies(jar), SessionPersistence::Persistent);
        assert_eq!(
            persistence_from_cookies("token=abc"),
            SessionPersistence::SessionLogin
        );
        assert!(clear_persistence_cookie().starts_with("token_persistence=;"));
    }
}
