use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("Invalid TW_LOG_FORMAT '{}', expected text or json", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// `None` when quote caching is disabled
    pub quote_cache_ttl: Option<Duration>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/app.db".into(),
            cors_allow: vec!["*".into()],
            request_timeout: Duration::from_millis(30000),
            quote_cache_ttl: None,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from a variable lookup; unset variables take defaults,
    /// malformed ones are errors.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Config::default();

        let listen_addr: SocketAddr = match var("TW_LISTEN_ADDR") {
            Some(addr) => addr.parse().context("Invalid TW_LISTEN_ADDR")?,
            None => defaults.listen_addr,
        };
        let db_path = var("TW_DB_PATH").unwrap_or(defaults.db_path);
        let cors_allow = match var("TW_CORS_ALLOW_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_allow,
        };
        let request_timeout = match var("TW_REQUEST_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(
                ms.trim().parse().context("Invalid TW_REQUEST_TIMEOUT_MS")?,
            ),
            None => defaults.request_timeout,
        };
        let quote_cache_ttl = match var("TW_QUOTE_CACHE_TTL_SECS") {
            Some(secs) => {
                let secs: u64 = secs.trim().parse().context("Invalid TW_QUOTE_CACHE_TTL_SECS")?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => defaults.quote_cache_ttl,
        };
        let log_format = match var("TW_LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout,
            quote_cache_ttl,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" TEXT ".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.db_path, "./db/app.db");
        assert_eq!(config.cors_allow, vec!["*"]);
        assert_eq!(config.quote_cache_ttl, None);
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: std::collections::HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_vars_defaults_when_unset() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.request_timeout, Duration::from_millis(30000));
        assert_eq!(config.quote_cache_ttl, None);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_quote_cache_ttl_wiring() {
        let config = Config::from_vars(vars(&[("TW_QUOTE_CACHE_TTL_SECS", "90")])).unwrap();
        assert_eq!(config.quote_cache_ttl, Some(Duration::from_secs(90)));

        let config = Config::from_vars(vars(&[("TW_QUOTE_CACHE_TTL_SECS", "0")])).unwrap();
        assert_eq!(config.quote_cache_ttl, None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("TW_LISTEN_ADDR", "127.0.0.1:9000"),
            ("TW_REQUEST_TIMEOUT_MS", "1500"),
            ("TW_CORS_ALLOW_ORIGINS", "http://a.test, http://b.test"),
            ("TW_LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
        assert_eq!(config.cors_allow, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_malformed_numbers_are_rejected() {
        let err = Config::from_vars(vars(&[("TW_REQUEST_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("TW_REQUEST_TIMEOUT_MS"));

        let err = Config::from_vars(vars(&[("TW_QUOTE_CACHE_TTL_SECS", "-5")])).unwrap_err();
        assert!(err.to_string().contains("TW_QUOTE_CACHE_TTL_SECS"));
    }
}
