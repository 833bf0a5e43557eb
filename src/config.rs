use std::str::FromStr;
use std::time::Duration;

use crate::errors::ServerError;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub port: u16,
    pub session_ttl: Duration,
    pub secure_cookies: bool,
    pub rate_limit_burst: u32,
    pub rate_limit_period: Duration,
    pub form_limit: usize,
}

impl Config {
    /// Reads the configuration from the process environment. Call
    /// `dotenv::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => {
                log::error!("env {key} is not set");
                Err(ServerError::EnvironmentError)
            }
        };

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            secret_key: required("SECRET_KEY")?,
            port: parse_or(&lookup, "PORT", 8080)?,
            session_ttl: Duration::from_secs(parse_or(&lookup, "SESSION_TTL_SECS", 604_800)?),
            secure_cookies: parse_or(&lookup, "SECURE_COOKIES", false)?,
            rate_limit_burst: parse_or(&lookup, "RATE_LIMIT_BURST", 120)?,
            rate_limit_period: Duration::from_secs(parse_or(&lookup, "RATE_LIMIT_PERIOD_SECS", 1)?),
            form_limit: parse_or(&lookup, "FORM_LIMIT_BYTES", 1_048_576)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ServerError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| {
            log::error!("env {key} has an invalid value: {raw:?}");
            ServerError::EnvironmentError
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_fill_optional_values() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/board"),
            ("SECRET_KEY", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.session_ttl, Duration::from_secs(604_800));
        assert!(!config.secure_cookies);
        assert_eq!(config.rate_limit_burst, 120);
        assert_eq!(config.form_limit, 1_048_576);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/board"),
            ("SECRET_KEY", "s3cret"),
            ("PORT", "3000"),
            ("SECURE_COOKIES", "true"),
            ("RATE_LIMIT_PERIOD_SECS", " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert!(config.secure_cookies);
        assert_eq!(config.rate_limit_period, Duration::from_secs(5));
    }

    #[test]
    fn missing_secret_is_an_environment_error() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/board")]))
            .unwrap_err();
        assert_eq!(err, ServerError::EnvironmentError);
    }

    #[test]
    fn garbage_port_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/board"),
            ("SECRET_KEY", "s3cret"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert_eq!(err, ServerError::EnvironmentError);
    }
}
