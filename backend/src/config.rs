//! Server configuration.
//!
//! Values come from an optional YAML file (path in `BOOKING_CONFIG`) and are
//! then overridden by `BOOKING_*` environment variables. Everything has a
//! default, so a bare `specialist-booking` starts without any setup.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_VAR: &str = "BOOKING_CONFIG";
pub const BIND_ADDRESS_VAR: &str = "BOOKING_BIND_ADDRESS";
pub const CORS_ORIGIN_VAR: &str = "BOOKING_CORS_ORIGIN";
pub const DATABASE_URL_VAR: &str = "BOOKING_DATABASE_URL";
pub const SINK_VAR: &str = "BOOKING_SINK";
pub const SESSION_IDLE_SECS_VAR: &str = "BOOKING_SESSION_IDLE_SECS";

const APP_DIR_NAME: &str = "specialist-booking";
const DATABASE_FILE_NAME: &str = "bookings.db";

/// Where confirmed bookings go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Store in "My Bookings"
    #[default]
    Record,
    /// Only write a log line
    Log,
}

impl SinkKind {
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "record" => Ok(SinkKind::Record),
            "log" => Ok(SinkKind::Log),
            other => Err(format!("Unknown sink '{}' (expected 'record' or 'log')", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    pub cors_origin: String,
    /// `None` means a SQLite file under the user data directory
    pub database_url: Option<String>,
    pub sink: SinkKind,
    /// Open wizards untouched for this long are dropped
    pub session_idle_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            database_url: None,
            sink: SinkKind::Record,
            session_idle_secs: 30 * 60,
        }
    }
}

impl AppConfig {
    /// Load from `BOOKING_CONFIG` (if set) and the process environment
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_yaml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply `BOOKING_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(BIND_ADDRESS_VAR) {
            self.bind_address = value;
        }
        if let Some(value) = lookup(CORS_ORIGIN_VAR) {
            self.cors_origin = value;
        }
        if let Some(value) = lookup(DATABASE_URL_VAR) {
            self.database_url = Some(value);
        }
        if let Some(value) = lookup(SINK_VAR) {
            self.sink = SinkKind::from_string(&value).map_err(anyhow::Error::msg)?;
        }
        if let Some(value) = lookup(SESSION_IDLE_SECS_VAR) {
            self.session_idle_secs = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} '{}'", SESSION_IDLE_SECS_VAR, value))?;
        }
        Ok(())
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.bind_address))
    }

    /// The configured database URL, or a file in the user data directory
    pub fn resolved_database_url(&self) -> Result<String> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }

        let dir = default_data_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        Ok(format!("sqlite://{}", dir.join(DATABASE_FILE_NAME).display()))
    }
}

fn default_data_dir() -> Result<PathBuf> {
    match dirs::data_dir() {
        Some(dir) => Ok(dir.join(APP_DIR_NAME)),
        None => {
            warn!("No user data directory on this platform, using the working directory");
            Ok(std::env::current_dir()?.join(APP_DIR_NAME))
        }
    }
}
