use anyhow::Result;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::bank::client::DEFAULT_BANK_TIMEOUT;
use crate::validation::DEFAULT_CURRENCIES;

pub const DEFAULT_BANK_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub bank_url: String,
    pub bank_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub supported_currencies: Vec<String>,
    pub cors_allowed_origins: Option<String>,
    pub log_request_body: bool,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8090,
            bank_url: DEFAULT_BANK_URL.to_string(),
            bank_timeout_secs: DEFAULT_BANK_TIMEOUT.as_secs(),
            request_timeout_secs: DEFAULT_BANK_TIMEOUT.as_secs() + 5,
            supported_currencies: DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect(),
            cors_allowed_origins: None,
            log_request_body: false,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env file if present

        let defaults = Config::default();

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| defaults.server_port.to_string())
                .parse()?,
            bank_url: env::var("BANK_URL").unwrap_or(defaults.bank_url),
            bank_timeout_secs: env::var("BANK_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.bank_timeout_secs.to_string())
                .parse()?,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.request_timeout_secs.to_string())
                .parse()?,
            supported_currencies: env::var("SUPPORTED_CURRENCIES")
                .map(|raw| parse_list(&raw))
                .unwrap_or(defaults.supported_currencies),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS").ok(),
            log_request_body: env::var("LOG_REQUEST_BODY")
                .unwrap_or_else(|_| "false".to_string())
                .parse()?,
            log_format: parse_log_format(&env::var("LOG_FORMAT").unwrap_or_default())?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            anyhow::bail!("SERVER_PORT must be greater than 0");
        }
        if self.bank_timeout_secs == 0 {
            anyhow::bail!("BANK_TIMEOUT_SECS must be greater than 0");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than 0");
        }
        // The request timer starts before the bank call, so it must outlast it.
        if self.request_timeout_secs <= self.bank_timeout_secs {
            anyhow::bail!(
                "REQUEST_TIMEOUT_SECS ({}) must be greater than BANK_TIMEOUT_SECS ({})",
                self.request_timeout_secs,
                self.bank_timeout_secs
            );
        }
        if self.supported_currencies.is_empty() {
            anyhow::bail!("SUPPORTED_CURRENCIES must list at least one currency");
        }

        url::Url::parse(&self.bank_url)
            .map_err(|e| anyhow::anyhow!("BANK_URL is not a valid URL: {}", e))?;

        Ok(())
    }

    pub fn bank_timeout(&self) -> Duration {
        Duration::from_secs(self.bank_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .map(parse_list)
            .unwrap_or_default()
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_log_format(raw: &str) -> Result<LogFormat> {
    match raw.trim().to_lowercase().as_str() {
        "" | "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bank_timeout(), Duration::from_secs(10));
        assert_eq!(config.supported_currencies, vec!["USD", "GBP", "EUR"]);
    }

    #[test]
    fn test_validate_invalid_bank_url() {
        let config = Config {
            bank_url: "not-a-url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_port_and_timeout() {
        let config = Config {
            server_port: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            bank_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_request_timeout_must_outlast_bank_timeout() {
        let config = Config {
            bank_timeout_secs: 10,
            request_timeout_secs: 10,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            bank_timeout_secs: 1,
            request_timeout_secs: 2,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
        assert!(Config::default().request_timeout() > Config::default().bank_timeout());
    }

    #[test]
    fn test_validate_empty_currency_set() {
        let config = Config {
            supported_currencies: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list(" USD, GBP ,,EUR "), vec!["USD", "GBP", "EUR"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_parse_log_format() {
        assert_eq!(parse_log_format("").unwrap(), LogFormat::Text);
        assert_eq!(parse_log_format("JSON").unwrap(), LogFormat::Json);
        assert!(parse_log_format("xml").is_err());
    }

    #[test]
    fn test_cors_origins() {
        let config = Config {
            cors_allowed_origins: Some("http://a.test, http://b.test".to_string()),
            ..Config::default()
        };
        assert_eq!(config.cors_origins(), vec!["http://a.test", "http://b.test"]);
        assert!(Config::default().cors_origins().is_empty());
    }
}
