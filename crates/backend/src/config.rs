use std::env;

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Where the client finds the backend and how it stores the session cookie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub secure_cookie: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            secure_cookie: false,
        }
    }
}

impl ApiConfig {
    /// Read `TASKBOARD_API_URL` and `TASKBOARD_SECURE_COOKIE`.
    ///
    /// The browser build has no process environment, so the values baked in
    /// at compile time are used there.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = load("TASKBOARD_API_URL", option_env!("TASKBOARD_API_URL"))
            .unwrap_or_else(|| {
                info!("TASKBOARD_API_URL not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_owned()
            });
        let secure_cookie = load(
            "TASKBOARD_SECURE_COOKIE",
            option_env!("TASKBOARD_SECURE_COOKIE"),
        )
        .is_some_and(|raw| parse_flag("TASKBOARD_SECURE_COOKIE", &raw));

        Self {
            base_url,
            secure_cookie,
        }
    }
}

fn load(key: &str, baked: Option<&'static str>) -> Option<String> {
    env::var(key)
        .ok()
        .or_else(|| baked.map(str::to_owned))
        .filter(|value| !value.trim().is_empty())
}

fn parse_flag(key: &str, raw: &str) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => {
            warn!("Invalid {key} value: {other}, using false");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse_loosely() {
        assert!(parse_flag("K", "TRUE"));
        assert!(parse_flag("K", " 1 "));
        assert!(!parse_flag("K", "off"));
        assert!(!parse_flag("K", "maybe"));
    }

    #[test]
    fn baked_value_is_used_when_env_missing() {
        assert_eq!(
            load("TASKBOARD_TEST_UNSET_KEY", Some("http://api")).as_deref(),
            Some("http://api")
        );
        assert!(load("TASKBOARD_TEST_UNSET_KEY", Some("  ")).is_none());
    }
}
