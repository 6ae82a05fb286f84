//! Configuration module for the company search service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON company data file
    pub company_data_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// Prometheus metrics HTTP port
    pub metrics_port: u16,
    /// Bind address (supports IPv4, IPv6, or dual-stack)
    pub bind_address: String,
    /// Use the built-in sample repository instead of a data file
    pub mock_companies: bool,
    /// Origins allowed by CORS; empty disables CORS
    pub allowed_origins: Vec<String>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `COMPANY_DATA_PATH` - Path to the company JSON file (required unless MOCK_COMPANIES=true)
    /// - `HTTP_PORT` - HTTP listen port (default: 3000)
    /// - `METRICS_PORT` - Prometheus metrics port (default: 9090)
    /// - `BIND_ADDRESS` - Bind address (default: auto-detect [::] or 0.0.0.0)
    /// - `MOCK_COMPANIES` - Use sample companies for testing (default: false)
    /// - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: none)
    /// - `RUST_LOG` - Log level (default: info)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mock_companies = env::var("MOCK_COMPANIES")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        let company_data_path = env::var("COMPANY_DATA_PATH").unwrap_or_else(|_| {
            if mock_companies {
                String::new()
            } else {
                "data/companies.json".to_string()
            }
        });

        if !mock_companies && company_data_path.is_empty() {
            return Err(ConfigError::MissingRequired("COMPANY_DATA_PATH"));
        }

        let http_port = parse_port("HTTP_PORT", 3000);
        let metrics_port = parse_port("METRICS_PORT", 9090);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "auto".to_string());

        Ok(Config {
            company_data_path,
            http_port,
            metrics_port,
            bind_address,
            mock_companies,
            allowed_origins,
            log_level,
        })
    }

    /// Log filter built from `log_level`, falling back to `info` when it
    /// doesn't parse.
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// Resolve an explicit `bind_address` into a socket address on `port`.
    ///
    /// Returns `None` for `auto`; the caller tries dual-stack first.
    /// IPv6 addresses may be given with or without brackets.
    pub fn explicit_socket_addr(&self, port: u16) -> Result<Option<SocketAddr>, ConfigError> {
        if self.bind_address == "auto" {
            return Ok(None);
        }

        let bind_str = if self.bind_address.contains(':') && !self.bind_address.starts_with('[') {
            format!("[{}]:{}", self.bind_address, port)
        } else {
            format!("{}:{}", self.bind_address, port)
        };

        bind_str
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidBindAddress(self.bind_address.clone()))
    }
}

fn parse_port(key: &str, default: u16) -> u16 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config_with_log_level(log_level: &str) -> Config {
        Config {
            log_level: log_level.to_string(),
            ..config_with_bind("auto")
        }
    }

    fn config_with_bind(bind_address: &str) -> Config {
        Config {
            company_data_path: String::new(),
            http_port: 3000,
            metrics_port: 9090,
            bind_address: bind_address.to_string(),
            mock_companies: true,
            allowed_origins: Vec::new(),
            log_level: "info".to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults_with_mock_companies() {
        env::set_var("MOCK_COMPANIES", "true");
        env::remove_var("COMPANY_DATA_PATH");
        env::remove_var("HTTP_PORT");
        env::remove_var("METRICS_PORT");
        env::remove_var("ALLOWED_ORIGINS");

        let config = Config::from_env().unwrap();
        assert!(config.mock_companies);
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.metrics_port, 9090);
        assert!(config.allowed_origins.is_empty());

        env::remove_var("MOCK_COMPANIES");
    }

    #[test]
    #[serial]
    fn test_allowed_origins_are_split_and_trimmed() {
        env::set_var("MOCK_COMPANIES", "true");
        env::set_var("ALLOWED_ORIGINS", "https://a.example, https://b.example,,");

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );

        env::remove_var("ALLOWED_ORIGINS");
        env::remove_var("MOCK_COMPANIES");
    }

    #[test]
    fn test_log_filter_uses_log_level() {
        let filter = config_with_log_level("company_search=debug").log_filter();
        assert_eq!(filter.to_string(), "company_search=debug");
    }

    #[test]
    fn test_log_filter_falls_back_to_info() {
        let filter = config_with_log_level("company_search=loud").log_filter();
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn test_auto_bind_address_has_no_explicit_addr() {
        let config = config_with_bind("auto");
        assert!(config.explicit_socket_addr(3000).unwrap().is_none());
    }

    #[test]
    fn test_ipv4_bind_address() {
        let addr = config_with_bind("127.0.0.1")
            .explicit_socket_addr(3000)
            .unwrap()
            .unwrap();
        assert!(addr.is_ipv4());
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_ipv6_bind_address_without_brackets() {
        let addr = config_with_bind("::").explicit_socket_addr(8080).unwrap().unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_ipv6_bind_address_with_brackets() {
        let addr = config_with_bind("[::1]").explicit_socket_addr(8080).unwrap().unwrap();
        assert!(addr.is_ipv6());
    }

    #[test]
    fn test_invalid_bind_address() {
        let result = config_with_bind("not-an-address").explicit_socket_addr(3000);
        assert!(matches!(result, Err(ConfigError::InvalidBindAddress(_))));
    }
}
