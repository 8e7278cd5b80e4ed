//! CLI configuration management
//!
//! Settings are layered, lowest priority first: built-in defaults, an
//! optional TOML file, `NUMKIT_*` environment variables, then command-line
//! flags.

use std::path::Path;
use std::str::FromStr;

use numkit_core::problem::SolverDefaults;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable prefix, e.g. `NUMKIT_PRECISION`.
pub const ENV_PREFIX: &str = "NUMKIT";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: text, json")]
    InvalidOutputFormat(String),

    #[error("Invalid precision: {0}. Must be positive and finite")]
    InvalidPrecision(f64),

    #[error("Invalid step size: {0}. Must be positive and finite")]
    InvalidStepSize(f64),

    #[error("Invalid iteration cap: must be at least 1")]
    InvalidMaxIterations,

    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// The result record as pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Result rendering
    #[serde(deserialize_with = "deserialize_from_str")]
    pub output: OutputFormat,
    /// Convergence threshold for extremum and quadrature
    pub precision: f64,
    /// Iteration cap for extremum and quadrature
    pub max_iterations: usize,
    /// Nominal ODE step
    pub step_size: f64,
    /// Monte Carlo seed; unset draws fresh entropy per run
    pub monte_carlo_seed: Option<u64>,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for AppConfig {
    fn default() -> Self {
        let solver = SolverDefaults::default();
        Self {
            log_level: LogLevel::default(),
            output: OutputFormat::default(),
            precision: solver.precision,
            max_iterations: solver.max_iterations,
            step_size: solver.step_size,
            monte_carlo_seed: solver.monte_carlo_seed,
        }
    }
}

impl AppConfig {
    /// Load defaults, then `path` if it exists, then `NUMKIT_*` variables.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(ConfigError::InvalidPrecision(self.precision));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ConfigError::InvalidStepSize(self.step_size));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidMaxIterations);
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        if let Some(precision) = cli.precision {
            self.precision = precision;
        }
        if let Some(max_iterations) = cli.max_iterations {
            self.max_iterations = max_iterations;
        }
        if let Some(seed) = cli.seed {
            self.monte_carlo_seed = Some(seed);
        }
    }

    /// Solver tunables applied to problems that do not set their own
    pub fn solver_defaults(&self) -> SolverDefaults {
        SolverDefaults {
            precision: self.precision,
            max_iterations: self.max_iterations,
            step_size: self.step_size,
            monte_carlo_seed: self.monte_carlo_seed,
        }
    }
}

/// Global flags that override file and environment settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub verbose: bool,
    pub output: Option<OutputFormat>,
    pub precision: Option<f64>,
    pub max_iterations: Option<usize>,
    pub seed: Option<u64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(path: &Path, cli: &CliOverrides) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::load(path)?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("numkit-{}-{}.toml", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.precision, 1e-6);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.step_size, 0.1);
        assert_eq!(config.monte_carlo_seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::from_str("csv").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AppConfig {
            precision: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPrecision(_))));

        let config = AppConfig {
            step_size: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidStepSize(_))));

        let config = AppConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMaxIterations)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("numkit-does-not-exist.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.step_size, AppConfig::default().step_size);
    }

    #[test]
    fn test_load_from_file() {
        let path = write_config(
            "load",
            "log_level = \"debug\"\noutput = \"json\"\nstep_size = 0.05\nmonte_carlo_seed = 42\n",
        );
        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.step_size, 0.05);
        assert_eq!(config.monte_carlo_seed, Some(42));
        assert_eq!(config.max_iterations, 1000);
    }

    #[test]
    fn test_invalid_file_value_is_rejected() {
        let path = write_config("invalid", "log_level = \"loud\"\n");
        let result = AppConfig::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut config = AppConfig::default();
        config.merge_with_cli(&CliOverrides {
            verbose: true,
            output: Some(OutputFormat::Json),
            precision: Some(1e-9),
            max_iterations: None,
            seed: Some(7),
        });

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.precision, 1e-9);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.monte_carlo_seed, Some(7));
    }

    #[test]
    fn test_solver_defaults_follow_config() {
        let config = AppConfig {
            step_size: 0.25,
            monte_carlo_seed: Some(3),
            ..Default::default()
        };
        let defaults = config.solver_defaults();
        assert_eq!(defaults.step_size, 0.25);
        assert_eq!(defaults.monte_carlo_seed, Some(3));
    }
}
