use axum::http::HeaderValue;
use chrono::NaiveDate;
use scada_core::machine::default_last_maintenance;

/// CORS origin value that allows any origin (without credentials).
pub const ANY_ORIGIN: &str = "*";

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// A configuration variable could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid value '{value}' for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A lone `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Name reported by `/api/health` and `/api/info`.
    pub service_name: String,
    /// Static maintenance date shown on the machine snapshot.
    pub last_maintenance: NaiveDate,
    /// Fixed seed for the machine simulator. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default                   |
    /// |----------------------------|---------------------------|
    /// | `HOST`                     | `0.0.0.0`                 |
    /// | `PORT`                     | `8000`                    |
    /// | `CORS_ORIGINS`             | `*`                       |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                      |
    /// | `SERVICE_NAME`             | `SCADA Monitoring System` |
    /// | `MACHINE_LAST_MAINTENANCE` | `2025-12-01`              |
    /// | `MACHINE_RNG_SEED`         | unset                     |
    /// | `LOG_FORMAT`               | `text`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = parse_or("PORT", lookup("PORT"), 8000u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| ANY_ORIGIN.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            if origin != ANY_ORIGIN {
                HeaderValue::from_str(origin).map_err(|e| ConfigError {
                    var: "CORS_ORIGINS",
                    value: origin.clone(),
                    reason: e.to_string(),
                })?;
            }
        }

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", lookup("REQUEST_TIMEOUT_SECS"), 30u64)?;

        let service_name =
            lookup("SERVICE_NAME").unwrap_or_else(|| "SCADA Monitoring System".into());

        let last_maintenance = match lookup("MACHINE_LAST_MAINTENANCE") {
            Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| ConfigError {
                var: "MACHINE_LAST_MAINTENANCE",
                value: raw,
                reason: e.to_string(),
            })?,
            None => default_last_maintenance(),
        };

        let rng_seed = lookup("MACHINE_RNG_SEED")
            .map(|raw| parse_or("MACHINE_RNG_SEED", Some(raw), 0u64))
            .transpose()?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected 'text' or 'json'".into(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            service_name,
            last_maintenance,
            rng_seed,
            log_format,
        })
    }

    /// True when CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

/// Parse `raw` if present, otherwise return `default`.
fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => {
            let parsed = raw.trim().parse::<T>();
            parsed.map_err(|e| ConfigError {
                var,
                reason: e.to_string(),
                value: raw,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins, vec!["*"]);
        assert!(config.allows_any_origin());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.service_name, "SCADA Monitoring System");
        assert_eq!(config.last_maintenance.to_string(), "2025-12-01");
        assert_eq!(config.rng_seed, None);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = load(&[
            ("PORT", "9100"),
            ("CORS_ORIGINS", "http://hmi.local, http://localhost:5173"),
            ("MACHINE_LAST_MAINTENANCE", "2026-03-15"),
            ("MACHINE_RNG_SEED", "99"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(
            config.cors_origins,
            vec!["http://hmi.local", "http://localhost:5173"]
        );
        assert!(!config.allows_any_origin());
        assert_eq!(config.last_maintenance.to_string(), "2026-03-15");
        assert_eq!(config.rng_seed, Some(99));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_port_names_the_variable() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.var, "PORT");
        assert_eq!(err.value, "eighty");
    }

    #[test]
    fn invalid_date_is_rejected() {
        let err = load(&[("MACHINE_LAST_MAINTENANCE", "01/12/2025")]).unwrap_err();
        assert_eq!(err.var, "MACHINE_LAST_MAINTENANCE");
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = load(&[("LOG_FORMAT", "xml")]).unwrap_err();
        assert_eq!(err.var, "LOG_FORMAT");
    }

    #[test]
    fn origin_with_control_characters_is_rejected() {
        let err = load(&[("CORS_ORIGINS", "http://ok.local,bad\u{7f}origin")]).unwrap_err();
        assert_eq!(err.var, "CORS_ORIGINS");
    }
}
