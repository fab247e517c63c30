//! Runtime rewrite configuration and its shared handle

use crate::rewriter::FormatTemplate;
use crate::whitelist::Whitelist;
use parking_lot::{Mutex, RwLock};
use stagemail_common::config::RewriteSettings;
use std::sync::{Arc, OnceLock};
use tracing::info;

/// Compiled rewrite configuration
///
/// `Default` passes obfuscated addresses through unchanged and whitelists
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Template for rewritten addresses
    pub format: FormatTemplate,
    /// Recipients delivered unchanged
    pub whitelist: Whitelist,
}

impl RewriteConfig {
    /// Compile the config file form, validating the format and patterns
    pub fn from_settings(settings: &RewriteSettings) -> stagemail_common::Result<Self> {
        Ok(Self {
            format: FormatTemplate::parse(&settings.format)?,
            whitelist: Whitelist::from_settings(&settings.whitelist)?,
        })
    }

    /// Replace the format template
    pub fn set_format(&mut self, format: &str) -> stagemail_common::Result<()> {
        self.format = FormatTemplate::parse(format)?;
        Ok(())
    }

    /// Restore defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Shared, swappable handle to a [`RewriteConfig`].
///
/// Readers take an `Arc` snapshot and never hold the lock while rewriting;
/// writers install a new snapshot. A message processed with one snapshot
/// sees one consistent configuration even if it is replaced meanwhile.
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    current: Arc<RwLock<Arc<RewriteConfig>>>,
    updates: Arc<Mutex<()>>,
}

impl ConfigHandle {
    /// Create a handle holding `config`
    pub fn new(config: RewriteConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(config))),
            updates: Arc::default(),
        }
    }

    /// Create a handle from the config file form
    pub fn from_settings(settings: &RewriteSettings) -> stagemail_common::Result<Self> {
        Ok(Self::new(RewriteConfig::from_settings(settings)?))
    }

    /// Current configuration
    pub fn snapshot(&self) -> Arc<RewriteConfig> {
        self.current.read().clone()
    }

    /// Current format template
    pub fn format(&self) -> FormatTemplate {
        self.snapshot().format.clone()
    }

    /// Current whitelist
    pub fn whitelist(&self) -> Whitelist {
        self.snapshot().whitelist.clone()
    }

    /// Install a new configuration
    pub fn replace(&self, config: RewriteConfig) {
        *self.current.write() = Arc::new(config);
        info!("Rewrite configuration replaced");
    }

    /// Modify a copy of the current configuration and install it.
    ///
    /// Nothing is installed when `f` returns an error. `f` runs without the
    /// read lock held, so it may read this handle. Concurrent updates are
    /// applied one after another; calling `update` from inside `f` blocks.
    pub fn update<F, T>(&self, f: F) -> stagemail_common::Result<T>
    where
        F: FnOnce(&mut RewriteConfig) -> stagemail_common::Result<T>,
    {
        let _serialized = self.updates.lock();
        let mut next = RewriteConfig::clone(&self.snapshot());
        let value = f(&mut next)?;
        *self.current.write() = Arc::new(next);
        Ok(value)
    }

    /// Restore the default configuration
    pub fn reset(&self) {
        *self.current.write() = Arc::new(RewriteConfig::default());
        info!("Rewrite configuration reset to defaults");
    }
}

/// Process-wide configuration handle
pub fn global() -> &'static ConfigHandle {
    static INSTANCE: OnceLock<ConfigHandle> = OnceLock::new();
    INSTANCE.get_or_init(ConfigHandle::default)
}

/// Modify the process-wide configuration
pub fn configure<F>(f: F) -> stagemail_common::Result<()>
where
    F: FnOnce(&mut RewriteConfig) -> stagemail_common::Result<()>,
{
    global().update(f)
}

/// Restore the process-wide configuration to defaults
pub fn reset_config() {
    global().reset();
}
