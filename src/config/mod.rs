use candidate_scoring::WeightingMode;
use std::env;
use std::fmt;

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

/// Top-level configuration for the ranker.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub scoring: ScoringConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let default_mode =
            WeightingMode::resolve(&env::var("RANKER_MODE").unwrap_or_else(|_| "balanced".to_string()));

        let range_check = match env::var("RANKER_RANGE_CHECK") {
            Ok(value) => parse_flag(&value).ok_or(ConfigError::InvalidRangeCheck { value })?,
            Err(_) => true,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = LogFormat::from_str(&env::var("APP_LOG_FORMAT").unwrap_or_default());

        Ok(Self {
            environment,
            scoring: ScoringConfig {
                default_mode,
                range_check,
            },
            telemetry: TelemetryConfig { log_level, format },
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Defaults applied to ranking runs unless overridden on the command line.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub default_mode: WeightingMode,
    pub range_check: bool,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

/// Line layout of log events on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    /// Default fmt layout with event targets, useful when filtering by module.
    Full,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" | "pretty" | "verbose" => Self::Full,
            _ => Self::Compact,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidRangeCheck { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRangeCheck { value } => write!(
                f,
                "RANKER_RANGE_CHECK must be one of true/false, 1/0, yes/no, on/off; got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
