use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the worker configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Service name, used for attribution in logs
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Routing key the worker is bound to
    #[serde(default = "default_routing_key")]
    pub routing_key: String,

    /// Factor axes understood by the translation engine
    pub factors: FactorsConfig,

    /// Maximum number of source characters per request
    #[serde(default = "default_char_limit")]
    pub char_limit: usize,

    /// Translation engine config
    #[serde(default)]
    pub engine: EngineConfig,

    /// Quality estimation model config, absent when QE is disabled
    #[serde(default)]
    pub qe: Option<EngineConfig>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// One factor axis: an ordered default list and a symbolic -> internal mapping
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct FactorAxis {
    /// Ordered default values; the first entry is the fallback
    pub factors: Vec<String>,

    /// Symbolic code -> internal engine code
    pub mapping: BTreeMap<String, String>,
}

impl FactorAxis {
    /// Build an axis from `(symbolic, internal)` pairs, defaults taken in pair order
    pub fn from_pairs(defaults: &[&str], pairs: &[(&str, &str)]) -> Self {
        Self {
            factors: defaults.iter().map(|d| d.to_string()).collect(),
            mapping: pairs.iter()
                .map(|(symbolic, internal)| (symbolic.to_string(), internal.to_string()))
                .collect(),
        }
    }

    /// First entry of the default list
    pub fn default_factor(&self) -> Option<&str> {
        self.factors.first().map(String::as_str)
    }

    /// Internal code for a symbolic code
    pub fn lookup(&self, symbolic: &str) -> Option<&str> {
        self.mapping.get(symbolic).map(String::as_str)
    }
}

/// Factor configuration of the translation engine
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FactorsConfig {
    /// Language axis, always present
    pub lang: FactorAxis,

    /// Domain axis, only for engines trained with domain factors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<FactorAxis>,
}

impl Default for FactorsConfig {
    fn default() -> Self {
        Self {
            lang: FactorAxis::from_pairs(
                &["et", "en", "de", "lt", "lv", "fi", "ru"],
                &[
                    ("et", "<2et>"),
                    ("en", "<2en>"),
                    ("de", "<2de>"),
                    ("lt", "<2lt>"),
                    ("lv", "<2lv>"),
                    ("fi", "<2fi>"),
                    ("ru", "<2ru>"),
                ],
            ),
            domain: Some(FactorAxis::from_pairs(
                &["<gen>"],
                &[
                    ("general", "<gen>"),
                    ("crisis", "<crisis>"),
                    ("legal", "<legal>"),
                    ("military", "<mil>"),
                ],
            )),
        }
    }
}

/// Model server connection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    /// Service URL
    #[serde(default = "default_engine_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: default_engine_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_service_name() -> String {
    "translation".to_string()
}

fn default_routing_key() -> String {
    "translation.public".to_string()
}

fn default_char_limit() -> usize {
    10000
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_engine_endpoint() -> String {
    "http://localhost:8000".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration, writing a default one first if the file is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::from_file(path);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let default_lang = self.factors.lang.default_factor()
            .ok_or_else(|| anyhow!("Language factor list must not be empty"))?;

        if self.factors.lang.lookup(default_lang).is_none() {
            return Err(anyhow!(
                "Default language '{}' has no entry in the language mapping",
                default_lang
            ));
        }

        if let Some(domain) = &self.factors.domain {
            if domain.default_factor().is_none() {
                return Err(anyhow!("Domain factor list must not be empty"));
            }
        }

        if self.char_limit == 0 {
            return Err(anyhow!("Character limit must be greater than zero"));
        }

        Url::parse(&self.engine.endpoint)
            .context(format!("Invalid engine endpoint: {}", self.engine.endpoint))?;

        if let Some(qe) = &self.qe {
            Url::parse(&qe.endpoint)
                .context(format!("Invalid QE endpoint: {}", qe.endpoint))?;
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            service_name: default_service_name(),
            routing_key: default_routing_key(),
            factors: FactorsConfig::default(),
            char_limit: default_char_limit(),
            engine: EngineConfig::default(),
            qe: None,
            log_level: LogLevel::default(),
        }
    }
}
