use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
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

/// Top-level configuration for the automation run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub batch: BatchConfig,
    pub portal: PortalConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let input_path =
            PathBuf::from(env::var("REFUND_INPUT_CSV").unwrap_or_else(|_| "data.csv".to_string()));
        let results_path = PathBuf::from(
            env::var("REFUND_RESULTS_CSV").unwrap_or_else(|_| "results.csv".to_string()),
        );

        let portal_url = match env::var("REFUND_PORTAL_URL") {
            Ok(url) => url,
            Err(_) => default_portal_url()?,
        };
        let webdriver_url =
            env::var("WEBDRIVER_URL").unwrap_or_else(|_| "http://localhost:9515".to_string());
        let settle_delay_ms = env::var("REFUND_SETTLE_MS")
            .unwrap_or_else(|_| "400".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidSettleDelay)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_file = env::var("APP_LOG_FILE").ok().map(PathBuf::from);

        Ok(Self {
            environment,
            batch: BatchConfig {
                input_path,
                results_path,
            },
            portal: PortalConfig {
                portal_url,
                webdriver_url,
                settle_delay_ms,
            },
            telemetry: TelemetryConfig {
                log_level,
                log_file,
            },
        })
    }
}

/// Locations of the refund batch input and the decision results file.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_path: PathBuf,
    pub results_path: PathBuf,
}

/// Settings for reaching the decision portal through a WebDriver endpoint.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub portal_url: String,
    pub webdriver_url: String,
    pub settle_delay_ms: u64,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

fn default_portal_url() -> Result<String, ConfigError> {
    let dir = env::current_dir().map_err(|source| ConfigError::WorkingDirectory { source })?;
    Ok(format!(
        "file://{}",
        dir.join("internal_portal.html").display()
    ))
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSettleDelay,
    WorkingDirectory { source: std::io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSettleDelay => {
                write!(f, "REFUND_SETTLE_MS must be a whole number of milliseconds")
            }
            ConfigError::WorkingDirectory { .. } => {
                write!(f, "unable to resolve the working directory for the portal URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidSettleDelay => None,
            ConfigError::WorkingDirectory { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("REFUND_INPUT_CSV");
        env::remove_var("REFUND_RESULTS_CSV");
        env::remove_var("REFUND_PORTAL_URL");
        env::remove_var("WEBDRIVER_URL");
        env::remove_var("REFUND_SETTLE_MS");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_LOG_FILE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.batch.input_path, PathBuf::from("data.csv"));
        assert_eq!(config.batch.results_path, PathBuf::from("results.csv"));
        assert!(config.portal.portal_url.starts_with("file://"));
        assert!(config.portal.portal_url.ends_with("internal_portal.html"));
        assert_eq!(config.portal.webdriver_url, "http://localhost:9515");
        assert_eq!(config.portal.settle_delay_ms, 400);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.log_file.is_none());
    }

    #[test]
    fn load_honors_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("REFUND_INPUT_CSV", "batches/today.csv");
        env::set_var("REFUND_PORTAL_URL", "http://portal.internal/refunds");
        env::set_var("REFUND_SETTLE_MS", "50");
        env::set_var("APP_LOG_FILE", "automation.log");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.batch.input_path, PathBuf::from("batches/today.csv"));
        assert_eq!(config.portal.portal_url, "http://portal.internal/refunds");
        assert_eq!(config.portal.settle_delay_ms, 50);
        assert_eq!(
            config.telemetry.log_file,
            Some(PathBuf::from("automation.log"))
        );
        reset_env();
    }

    #[test]
    fn load_rejects_non_numeric_settle_delay() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("REFUND_SETTLE_MS", "soon");
        let error = AppConfig::load().expect_err("expected settle delay error");
        assert!(matches!(error, ConfigError::InvalidSettleDelay));
        reset_env();
    }
}
