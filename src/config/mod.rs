use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::workflows::admission::CapacityLimits;

/// Top-level configuration for an admission run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub intake: IntakeConfig,
    pub output: OutputConfig,
    pub capacity: CapacityLimits,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let applicants_path = PathBuf::from(
            env::var("ADMISSION_APPLICANTS_PATH").unwrap_or_else(|_| "applicants.txt".to_string()),
        );
        let departments_path = env::var("ADMISSION_DEPARTMENTS_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let directory =
            PathBuf::from(env::var("ADMISSION_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()));

        let defaults = CapacityLimits::default();
        let min = capacity_bound("ADMISSION_CAPACITY_MIN", defaults.min)?;
        let max = capacity_bound("ADMISSION_CAPACITY_MAX", defaults.max)?;
        if min == 0 || min > max {
            return Err(ConfigError::InvertedCapacityLimits { min, max });
        }

        let log_level = env::var("ADMISSION_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            intake: IntakeConfig {
                applicants_path,
                departments_path,
            },
            output: OutputConfig { directory },
            capacity: CapacityLimits { min, max },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn capacity_bound(var: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidCapacityLimit { var }),
        Err(_) => Ok(default),
    }
}

/// Where applicants and the department catalog are read from.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub applicants_path: PathBuf,
    pub departments_path: Option<PathBuf>,
}

/// Where per-department result files are written.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCapacityLimit { var: &'static str },
    InvertedCapacityLimits { min: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCapacityLimit { var } => {
                write!(f, "{var} must be a non-negative integer")
            }
            ConfigError::InvertedCapacityLimits { min, max } => write!(
                f,
                "capacity limits must satisfy 1 <= min <= max (got min {min}, max {max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
