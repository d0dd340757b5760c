//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! sky-config.toml file. It provides a centralized way to configure the
//! default observer location, display options, and cache behavior for
//! the CLI binary; the library entry points take everything explicitly.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration loaded from sky-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default observer location
    pub observer: ObserverConfig,
    /// Display and rendering configuration
    pub display: DisplayConfig,
    /// Report cache configuration
    pub cache: CacheConfig,
}

/// Default observer location used when the CLI gets no coordinates
#[derive(Debug, Deserialize, Serialize)]
pub struct ObserverConfig {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
    /// Human-readable place name for reference
    pub name: String,
}

/// Display and rendering configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Fill color for the lit moon disc, #RRGGBB
    /// Pure white keeps the renderer default untouched
    pub moon_light_color: String,
}

/// Report cache configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Cache TTL in minutes
    pub ttl_minutes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            observer: ObserverConfig {
                latitude: 40.7128,
                longitude: -74.0060,
                name: "New York, NY".to_string(),
            },
            display: DisplayConfig {
                moon_light_color: "#FFFFFF".to_string(),
            },
            cache: CacheConfig { ttl_minutes: 60 },
        }
    }
}

impl Config {
    /// Load configuration from sky-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("sky-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("loaded configuration for observer: {}", config.observer.name);
                    config
                }
                Err(e) => {
                    warn!("invalid config file format: {e}");
                    warn!("using default configuration (New York, NY)");
                    Self::default()
                }
            },
            Err(_) => {
                info!("no config file found, using default configuration (New York, NY)");
                Self::default()
            }
        }
    }

    /// Save current configuration to sky-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("sky-config.toml", contents)?;
        info!("configuration saved to sky-config.toml");
        Ok(())
    }
}
