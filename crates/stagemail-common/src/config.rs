//! Configuration for stagemail

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "STAGEMAIL_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Recipient rewriting configuration
    #[serde(default)]
    pub rewrite: RewriteSettings,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "json" or "text"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Recipient rewriting configuration as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteSettings {
    /// Template for rewritten addresses, `%s` marks where the obfuscated
    /// address is inserted
    #[serde(default = "default_format")]
    pub format: String,

    /// Addresses and domains that are delivered unchanged
    #[serde(default)]
    pub whitelist: WhitelistSettings,
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            format: default_format(),
            whitelist: WhitelistSettings::default(),
        }
    }
}

/// Default format, passes the obfuscated address through unchanged
pub fn default_format() -> String {
    "%s".to_string()
}

/// Whitelist as written in the config file
///
/// Accepts either a table with `addresses` and `domains` lists, or a flat
/// list of addresses (the legacy shape), which is read as `addresses` with
/// an empty `domains` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WhitelistRepr")]
pub struct WhitelistSettings {
    /// Entries matched against the full address
    pub addresses: Vec<EntrySetting>,

    /// Entries matched against the domain part of the address
    pub domains: Vec<EntrySetting>,
}

impl WhitelistSettings {
    /// Build settings from a flat list of literal addresses
    pub fn flat<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses
                .into_iter()
                .map(|a| EntrySetting::Literal(a.into()))
                .collect(),
            domains: Vec::new(),
        }
    }
}

/// A single whitelist entry as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntrySetting {
    /// Plain string, matched exactly
    Literal(String),
    /// `{ pattern = "..." }`, a regular expression searched anywhere in
    /// the candidate
    Pattern { pattern: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WhitelistRepr {
    Flat(Vec<String>),
    Structured {
        #[serde(default)]
        addresses: Vec<EntrySetting>,
        #[serde(default)]
        domains: Vec<EntrySetting>,
    },
}

impl From<WhitelistRepr> for WhitelistSettings {
    fn from(repr: WhitelistRepr) -> Self {
        match repr {
            WhitelistRepr::Flat(addresses) => WhitelistSettings::flat(addresses),
            WhitelistRepr::Structured { addresses, domains } => Self { addresses, domains },
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        debug!(path = %path.display(), "Loading configuration");
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse(&content)
    }

    /// Load configuration from environment and file
    pub fn load() -> crate::Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::from_file(Path::new(&path));
        }

        // Try to load from default locations
        let paths = [
            PathBuf::from("./stagemail.toml"),
            PathBuf::from("/etc/stagemail/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(crate::Error::Config("No configuration file found".to_string()))
    }
}
