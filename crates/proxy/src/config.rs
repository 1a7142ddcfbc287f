use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::error::ProxyError;

pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001/api";

pub struct Config {
    pub port: u16,
    pub backend_url: String,
    /// Built web client served for every non-API path.
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Read `PROXY_PORT`, `BACKEND_URL` and `STATIC_DIR`.
    ///
    /// # Errors
    ///
    /// Returns `ProxyError::Config` when a set variable does not parse.
    pub fn load() -> Result<Self, ProxyError> {
        Ok(Self {
            port: try_load("PROXY_PORT", DEFAULT_PORT)?,
            backend_url: try_load("BACKEND_URL", DEFAULT_BACKEND_URL)?,
            static_dir: var("STATIC_DIR").map(PathBuf::from),
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ProxyError>
where
    T::Err: Display,
{
    resolve(key, var(key), default)
}

fn resolve<T: FromStr>(key: &'static str, raw: Option<String>, default: &str) -> Result<T, ProxyError>
where
    T::Err: Display,
{
    let raw = raw.unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_owned()
    });
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ProxyError::Config {
            key,
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let port: u16 = resolve("PROXY_PORT", None, DEFAULT_PORT).unwrap();
        assert_eq!(port, 3000);
        let url: String = resolve("BACKEND_URL", None, DEFAULT_BACKEND_URL).unwrap();
        assert_eq!(url, "http://localhost:3001/api");
    }

    #[test]
    fn set_values_win_and_bad_ones_fail() {
        let port: u16 = resolve("PROXY_PORT", Some(" 8080 ".into()), DEFAULT_PORT).unwrap();
        assert_eq!(port, 8080);
        let err = resolve::<u16>("PROXY_PORT", Some("eighty".into()), DEFAULT_PORT).unwrap_err();
        assert!(matches!(err, ProxyError::Config { key: "PROXY_PORT", .. }));
    }
}
