use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::metadata::CachePolicy;
use crate::recommend::EngineConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub engine: EngineConfig,
    pub cache: CachePolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let data = DataConfig {
            catalog_path: env::var("APP_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/templates.json")),
            card_data_path: env::var("APP_CARD_DATA_PATH").ok().map(PathBuf::from),
        };

        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            min_score: number("APP_MIN_SCORE", defaults.min_score)?,
            top_templates: number("APP_TOP_TEMPLATES", defaults.top_templates)?,
            recommendations_per_template: number(
                "APP_RECOMMENDATIONS_PER_TEMPLATE",
                defaults.recommendations_per_template,
            )?,
            max_recommendations: number("APP_MAX_RECOMMENDATIONS", defaults.max_recommendations)?,
            theme_candidates: number("APP_THEME_CANDIDATES", defaults.theme_candidates)?,
            workers: number("APP_WORKERS", defaults.workers)?,
        };

        let cache = CachePolicy {
            capacity: number("APP_CACHE_CAPACITY", CachePolicy::default().capacity)?,
            ttl: optional_number::<u64>("APP_CACHE_TTL_SECS")?.map(Duration::from_secs),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data,
            engine,
            cache,
        })
    }
}

fn number<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    Ok(optional_number(var)?.unwrap_or(default))
}

fn optional_number<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var }),
        _ => Ok(None),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the template catalog and local card data live on disk.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub catalog_path: PathBuf,
    /// Falls back to the bundled sample card data when unset.
    pub card_data_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var } => write!(f, "{var} must be a valid number"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    const VARS: &[&str] = &[
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "APP_LOG_LEVEL",
        "APP_CATALOG_PATH",
        "APP_CARD_DATA_PATH",
        "APP_MIN_SCORE",
        "APP_TOP_TEMPLATES",
        "APP_RECOMMENDATIONS_PER_TEMPLATE",
        "APP_MAX_RECOMMENDATIONS",
        "APP_THEME_CANDIDATES",
        "APP_WORKERS",
        "APP_CACHE_CAPACITY",
        "APP_CACHE_TTL_SECS",
    ];

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.data.catalog_path, PathBuf::from("data/templates.json"));
        assert!(config.data.card_data_path.is_none());
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.cache, CachePolicy::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn engine_and_cache_overrides_are_read() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("APP_MIN_SCORE", "45.5");
        env::set_var("APP_WORKERS", "4");
        env::set_var("APP_CACHE_CAPACITY", "0");
        env::set_var("APP_CACHE_TTL_SECS", "60");
        env::set_var("APP_CARD_DATA_PATH", "/srv/cards.json");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Test);
        assert!((config.engine.min_score - 45.5).abs() < f32::EPSILON);
        assert_eq!(config.engine.workers, 4);
        assert_eq!(config.engine.top_templates, 5);
        assert_eq!(config.cache.capacity, 0);
        assert_eq!(config.cache.ttl, Some(Duration::from_secs(60)));
        assert_eq!(
            config.data.card_data_path,
            Some(PathBuf::from("/srv/cards.json"))
        );
    }

    #[test]
    fn invalid_numbers_name_the_variable() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_TOP_TEMPLATES", "five");
        let err = AppConfig::load().expect_err("non-numeric value rejected");
        reset_env();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                var: "APP_TOP_TEMPLATES"
            }
        ));
        assert_eq!(err.to_string(), "APP_TOP_TEMPLATES must be a valid number");
    }
}
