use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::workflows::assessment::DEFAULT_MAX_SESSIONS;

/// Deployment stage, read from `APP_ENV`. Anything unrecognised runs as development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the guidance service and CLI read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub assessment: AssessmentSettings,
}

fn var_or(name: &str, fallback: &str) -> String {
    env::var(name).unwrap_or_else(|_| fallback.to_string())
}

/// Parse an optional variable; unset or blank yields `None`.
fn optional_var<T: FromStr>(name: &str) -> Result<Option<T>, String> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(|_| raw),
        _ => Ok(None),
    }
}

impl AppConfig {
    /// Read `.env` (if present) and then the `APP_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(&var_or("APP_ENV", "development"));
        let server = ServerConfig {
            host: var_or("APP_HOST", "127.0.0.1"),
            port: var_or("APP_PORT", "3001")
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
        };
        let telemetry = TelemetryConfig {
            log_level: var_or("APP_LOG_LEVEL", "info"),
        };

        let seed = optional_var::<u64>("APP_ASSESSMENT_SEED")
            .map_err(|value| ConfigError::InvalidSeed { value })?;
        let max_sessions = match optional_var::<usize>("APP_MAX_SESSIONS") {
            Ok(Some(0)) => return Err(ConfigError::InvalidMaxSessions { value: "0".into() }),
            Ok(value) => value.unwrap_or(DEFAULT_MAX_SESSIONS),
            Err(value) => return Err(ConfigError::InvalidMaxSessions { value }),
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            assessment: AssessmentSettings { seed, max_sessions },
        })
    }
}

/// Where the HTTP service listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolve the bind address. `localhost` is accepted as a loopback alias.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Assessment session knobs.
///
/// A fixed seed makes question order and the specialization draw reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentSettings {
    pub seed: Option<u64>,
    /// Live sessions held before the least recently opened one is evicted.
    pub max_sessions: usize,
}

impl AssessmentSettings {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            seed: None,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSeed { value: String },
    InvalidMaxSessions { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => f.write_str("APP_PORT is not a port number"),
            ConfigError::InvalidHost { .. } => f.write_str("APP_HOST is not an IP address"),
            ConfigError::InvalidSeed { value } => {
                write!(f, "APP_ASSESSMENT_SEED '{value}' is not an unsigned integer")
            }
            ConfigError::InvalidMaxSessions { value } => {
                write!(f, "APP_MAX_SESSIONS '{value}' must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSeed { .. }
            | ConfigError::InvalidMaxSessions { .. } => None,
        }
    }
}
