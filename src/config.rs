use std::env;
use std::num::{NonZeroU32, NonZeroU64};
use std::path::PathBuf;
use std::time::Duration;

use crate::db::Backend;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("DATABASE_URL must start with postgres://, postgresql:// or sqlite:")]
    UnsupportedDatabase,
}

const DEFAULT_MAX_CONNECTIONS: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

const DEFAULT_REQUEST_TIMEOUT_SECS: NonZeroU64 = match NonZeroU64::new(30) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub backend: Backend,
    pub database_max_connections: NonZeroU32,
    /// Create the PostgreSQL database named in the URL when it is absent.
    pub database_create_if_missing: bool,

    pub host: String,
    pub port: u16,

    /// Empty means any origin is allowed.
    pub cors_allowed_origins: Vec<String>,
    pub static_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let backend = Backend::from_url(&database_url).ok_or(ConfigError::UnsupportedDatabase)?;

        Ok(Self {
            backend,
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
                "a positive number",
            )?,
            database_create_if_missing: parse_or(
                &lookup,
                "DATABASE_CREATE_IF_MISSING",
                false,
                "true or false",
            )?,
            database_url,

            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "PORT", 3000, "a number")?,

            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            static_dir: lookup("STATIC_DIR")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            request_timeout: Duration::from_secs(
                parse_or(
                    &lookup,
                    "REQUEST_TIMEOUT_SECS",
                    DEFAULT_REQUEST_TIMEOUT_SECS,
                    "a positive number of seconds",
                )?
                .get(),
            ),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/todos")]).unwrap();

        assert_eq!(config.backend, Backend::Postgres);
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
        assert_eq!(config.database_max_connections.get(), 10);
        assert!(!config.database_create_if_missing);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = config_from(&[("PORT", "8080")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = config_from(&[("DATABASE_URL", "mongodb://localhost/todos")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedDatabase));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = config_from(&[("DATABASE_URL", "sqlite::memory:"), ("PORT", "http")]).unwrap_err();
        assert_eq!(err.to_string(), "PORT must be a number, got \"http\"");
    }

    #[test]
    fn zero_pool_size_and_timeout_are_rejected() {
        let err = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "DATABASE_MAX_CONNECTIONS must be a positive number, got \"0\""
        );

        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
        ])
        .unwrap();
        assert_eq!(config.database_max_connections.get(), 4);

        let err = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("REQUEST_TIMEOUT_SECS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite://todos.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_CREATE_IF_MISSING", "true"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
            ("STATIC_DIR", "site"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert!(config.database_create_if_missing);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(config.static_dir, PathBuf::from("site"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
