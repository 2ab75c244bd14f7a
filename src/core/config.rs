//! Logger configuration and per-environment defaults

use super::error::{LoggerError, Result};
use super::handler::Handler;
use super::log_level::{default_level, Level};
use super::logger::ExitHook;
use super::output::Output;
use super::timestamp::DEFAULT_TIME_FORMAT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Runtime environment a service is deployed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Test,
    #[serde(rename = "dev")]
    Development,
    Qa,
    Staging,
    #[serde(rename = "prod", alias = "production")]
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Test => "test",
            Environment::Development => "dev",
            Environment::Qa => "qa",
            Environment::Staging => "staging",
            Environment::Production => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "test" => Ok(Environment::Test),
            "dev" => Ok(Environment::Development),
            "qa" => Ok(Environment::Qa),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(LoggerError::InvalidEnvironment(s.to_string())),
        }
    }
}

/// Configuration for building a [`Logger`](super::Logger).
///
/// # Example
///
/// ```
/// use logkit::prelude::*;
///
/// let config = Config::new()
///     .level(Level::Debug)
///     .json_output(true)
///     .time_format("-");
/// let logger = Logger::with_config(config).unwrap();
/// assert_eq!(logger.level(), Level::Debug);
/// ```
#[derive(Clone, Default)]
pub struct Config {
    /// Threshold; `None` uses [`default_level`] at build time
    pub level: Option<Level>,
    /// Sink for the built-in handlers; `None` writes to stdout
    pub output: Option<Output>,
    /// Select the JSON handler instead of the console handler
    pub json_output: bool,
    /// Attach the `file:line` of the logging call to each record
    pub caller_info: bool,
    /// strftime layout; `""` for the default, `"-"` to omit timestamps
    pub time_format: String,
    /// Custom handler; replaces the built-in console/JSON selection
    pub handler: Option<Arc<dyn Handler>>,
    /// Replaces process termination after fatal records
    pub exit_hook: Option<ExitHook>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration for the given environment.
    ///
    /// Test and development get human-readable output with caller info;
    /// staging and production get JSON without it. Other environments have
    /// no preset and are rejected.
    pub fn for_env(environment: Environment) -> Result<Self> {
        let mut config = Config {
            level: Some(default_level()),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            ..Config::default()
        };

        match environment {
            Environment::Test | Environment::Development => {
                config.json_output = false;
                config.caller_info = true;
            }
            Environment::Staging | Environment::Production => {
                config.json_output = true;
                config.caller_info = false;
            }
            Environment::Local | Environment::Qa => {
                return Err(LoggerError::InvalidEnvironment(environment.to_string()));
            }
        }

        Ok(config)
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json_output(mut self, enabled: bool) -> Self {
        self.json_output = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_info(mut self, enabled: bool) -> Self {
        self.caller_info = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handler = Some(handler);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn exit_hook(mut self, hook: ExitHook) -> Self {
        self.exit_hook = Some(hook);
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("level", &self.level)
            .field("json_output", &self.json_output)
            .field("caller_info", &self.caller_info)
            .field("time_format", &self.time_format)
            .field("custom_handler", &self.handler.is_some())
            .field("custom_exit_hook", &self.exit_hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("PRODUCTION".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!(matches!(
            "moon".parse::<Environment>(),
            Err(LoggerError::InvalidEnvironment(_))
        ));
    }

    #[test]
    fn test_environment_deserialize() {
        let env: Environment = serde_json::from_str("\"staging\"").unwrap();
        assert_eq!(env, Environment::Staging);
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, Environment::Production);
    }

    #[test]
    fn test_for_env_development() {
        let config = Config::for_env(Environment::Development).unwrap();
        assert!(!config.json_output);
        assert!(config.caller_info);
        assert_eq!(config.time_format, DEFAULT_TIME_FORMAT);
        assert!(config.level.is_some());
    }

    #[test]
    fn test_for_env_production() {
        let config = Config::for_env(Environment::Production).unwrap();
        assert!(config.json_output);
        assert!(!config.caller_info);
    }

    #[test]
    fn test_for_env_without_preset() {
        let err = Config::for_env(Environment::Qa).unwrap_err();
        assert_eq!(err.to_string(), "invalid environment specified 'qa'");
        assert!(Config::for_env(Environment::Local).is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = Config::new()
            .level(Level::Warn)
            .json_output(true)
            .caller_info(true)
            .time_format("-");

        assert_eq!(config.level, Some(Level::Warn));
        assert!(config.json_output);
        assert!(config.caller_info);
        assert_eq!(config.time_format, "-");
        assert!(config.handler.is_none());
    }
}
