use std::time::Duration;

use anyhow::{Context, Result};

use crate::intake::BannerTiming;

/// Application configuration loaded from environment variables.
/// Fails at startup if `API_BASE_URL` is missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the applicant backend; submissions go to `<base>/signup`.
    pub api_base_url: String,
    pub port: u16,
    pub rust_log: String,
    pub banners: BannerTiming,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests never touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = BannerTiming::default();

        Ok(Config {
            api_base_url: require(&lookup, "API_BASE_URL")?,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            banners: BannerTiming {
                success: millis(&lookup, "SUCCESS_BANNER_MS", defaults.success)?,
                validation_error: millis(
                    &lookup,
                    "VALIDATION_ERROR_BANNER_MS",
                    defaults.validation_error,
                )?,
                submission_error: millis(
                    &lookup,
                    "SUBMISSION_ERROR_BANNER_MS",
                    defaults.submission_error,
                )?,
            },
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .with_context(|| format!("{key} must be a whole number of milliseconds")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_base_url() {
        let config = Config::from_lookup(lookup_from(&[("API_BASE_URL", "http://backend:4000")]))
            .expect("config loads");
        assert_eq!(config.api_base_url, "http://backend:4000");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.banners, BannerTiming::default());
    }

    #[test]
    fn test_missing_base_url_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("API_BASE_URL"));

        assert!(Config::from_lookup(lookup_from(&[("API_BASE_URL", "  ")])).is_err());
    }

    #[test]
    fn test_banner_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_BASE_URL", "http://backend"),
            ("SUCCESS_BANNER_MS", "1500"),
            ("SUBMISSION_ERROR_BANNER_MS", "8000"),
        ]))
        .unwrap();
        assert_eq!(config.banners.success, Duration::from_millis(1500));
        assert_eq!(config.banners.validation_error, Duration::from_millis(2000));
        assert_eq!(config.banners.submission_error, Duration::from_millis(8000));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[
            ("API_BASE_URL", "http://backend"),
            ("PORT", "eighty"),
        ]))
        .is_err());
        assert!(Config::from_lookup(lookup_from(&[
            ("API_BASE_URL", "http://backend"),
            ("SUCCESS_BANNER_MS", "-5"),
        ]))
        .is_err());
    }
}
