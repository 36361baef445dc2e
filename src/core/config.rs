use crate::validation::params::validate_field;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub unix_socket: Option<PathBuf>,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_base_fare")]
    pub base_fare: f64,
    #[serde(default = "default_per_unit_rate")]
    pub per_unit_rate: f64,
    /// Seconds between dispatch summary log lines
    #[serde(default = "default_stats_interval")]
    pub stats_interval: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExportConfig {
    /// Ride log written on graceful shutdown
    pub ride_log_path: Option<PathBuf>,
}

/// Accounts registered before the listeners start
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SeedConfig {
    #[serde(default)]
    pub drivers: Vec<SeedDriver>,
    #[serde(default)]
    pub riders: Vec<SeedRider>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedDriver {
    pub username: String,
    pub password: String,
    /// Drivers with a location start out available there
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRider {
    pub username: String,
    pub password: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            base_fare: default_base_fare(),
            per_unit_rate: default_per_unit_rate(),
            stats_interval: default_stats_interval(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_base_fare() -> f64 {
    crate::dispatch::fare::BASE_FARE
}

fn default_per_unit_rate() -> f64 {
    crate::dispatch::fare::PER_UNIT_RATE
}

fn default_stats_interval() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port.is_none() && self.server.unix_socket.is_none() {
            bail!("Either port or unix_socket must be specified in server config");
        }

        if let Some(port) = self.server.port {
            if port == 0 {
                bail!("Server port must be greater than 0");
            }
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if !self.dispatch.base_fare.is_finite() || self.dispatch.base_fare < 0.0 {
            bail!("base_fare must be a non-negative number");
        }

        if !self.dispatch.per_unit_rate.is_finite() || self.dispatch.per_unit_rate < 0.0 {
            bail!("per_unit_rate must be a non-negative number");
        }

        if self.dispatch.stats_interval == 0 {
            bail!("stats_interval must be greater than 0");
        }

        if self.admin.api_key.is_empty() {
            bail!("admin api_key must not be empty");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        for driver in &self.seed.drivers {
            validate_field("username", &driver.username)
                .and_then(|_| validate_field("password", &driver.password))
                .and_then(|_| match &driver.location {
                    Some(location) => validate_field("location", location),
                    None => Ok(()),
                })
                .with_context(|| format!("Invalid seed driver '{}'", driver.username))?;
        }

        for rider in &self.seed.riders {
            validate_field("username", &rider.username)
                .and_then(|_| validate_field("password", &rider.password))
                .with_context(|| format!("Invalid seed rider '{}'", rider.username))?;
        }

        Ok(())
    }
}
