use chrono::FixedOffset;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::HeatWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub evaluation: EvaluationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            max_radius_km: default_max_radius_km(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_radius_km() -> f64 { 5.0 }
fn default_max_radius_km() -> f64 { 50.0 }
fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }

/// Reference timezone for happy hour evaluation
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationSettings {
    /// Offset from UTC in minutes, Singapore (UTC+8) by default
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

fn default_utc_offset_minutes() -> i32 { 8 * 60 }

impl EvaluationSettings {
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            ConfigError::Message(format!(
                "evaluation.utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            ))
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub heat: HeatConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeatConfig {
    #[serde(default = "default_good_deal_savings_pct")]
    pub good_deal_savings_pct: f64,
    #[serde(default = "default_deals_per_point")]
    pub deals_per_point: f64,
    #[serde(default = "default_max_volume_points")]
    pub max_volume_points: f64,
    #[serde(default = "default_max_discount_points")]
    pub max_discount_points: f64,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            good_deal_savings_pct: default_good_deal_savings_pct(),
            deals_per_point: default_deals_per_point(),
            max_volume_points: default_max_volume_points(),
            max_discount_points: default_max_discount_points(),
        }
    }
}

fn default_good_deal_savings_pct() -> f64 { 20.0 }
fn default_deals_per_point() -> f64 { 2.0 }
fn default_max_volume_points() -> f64 { 5.0 }
fn default_max_discount_points() -> f64 { 5.0 }

impl From<&HeatConfig> for HeatWeights {
    fn from(config: &HeatConfig) -> Self {
        Self {
            good_deal_savings_pct: config.good_deal_savings_pct,
            deals_per_point: config.deals_per_point,
            max_volume_points: config.max_volume_points,
            max_discount_points: config.max_discount_points,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HAPPYHOUR__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HAPPYHOUR__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("HAPPYHOUR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
