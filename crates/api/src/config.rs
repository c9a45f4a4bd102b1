use serde::Deserialize;
use std::net::SocketAddr;

pub use persistence::db::DatabaseConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

/// Log output format. Json is for shipped logs, pretty for local runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> LogFormat {
    LogFormat::Json
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with REGATTA__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("REGATTA").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        let host = self
            .server
            .host
            .parse()
            .unwrap_or_else(|_| std::net::IpAddr::from([0, 0, 0, 0]));
        SocketAddr::new(host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_from_toml(raw: &str) -> Config {
        let config = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap();
        config.try_deserialize().unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let config = load_from_toml(
            r#"
            [server]
            [database]
            url = "postgres://localhost/regatta"
            [logging]
            "#,
        );
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_parses() {
        let config = load_from_toml(
            r#"
            [server]
            [database]
            url = "postgres://localhost/regatta"
            [logging]
            format = "pretty"
            "#,
        );
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_socket_addr() {
        let config = load_from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            [database]
            url = "postgres://localhost/regatta"
            [logging]
            "#,
        );
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
    }
}
