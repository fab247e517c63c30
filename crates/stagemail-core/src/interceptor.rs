//! Interceptor - Rewrites the recipients of a message before delivery

use crate::rewriter::Rewriter;
use crate::settings::{self, ConfigHandle, RewriteConfig};
use stagemail_common::{Config, RecipientField, Recipients};
use tracing::{debug, info};

/// Pre-delivery hook rewriting To, Cc and Bcc
///
/// `Default` reads the process-wide configuration, like
/// [`Interceptor::with_global_config`].
#[derive(Debug, Clone)]
pub struct Interceptor {
    config: ConfigHandle,
}

impl Interceptor {
    /// Create an interceptor reading `config` on every message
    pub fn new(config: ConfigHandle) -> Self {
        Self { config }
    }

    /// Create an interceptor from the `[rewrite]` section of a config file
    pub fn from_config(config: &Config) -> stagemail_common::Result<Self> {
        let handle = ConfigHandle::from_settings(&config.rewrite)?;
        info!(
            format = %handle.format(),
            whitelisted_addresses = config.rewrite.whitelist.addresses.len(),
            whitelisted_domains = config.rewrite.whitelist.domains.len(),
            "Interceptor configured"
        );
        Ok(Self::new(handle))
    }

    /// Create an interceptor reading the process-wide configuration
    pub fn with_global_config() -> Self {
        Self::new(settings::global().clone())
    }

    /// Configuration handle used by this interceptor
    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Rewrite the recipients of `message` in place.
    ///
    /// One configuration snapshot is taken per message.
    pub fn intercept<M: Recipients + ?Sized>(&self, message: &mut M) {
        let config = self.config.snapshot();
        intercept(message, &config);
    }
}

impl Default for Interceptor {
    fn default() -> Self {
        Self::with_global_config()
    }
}

/// Rewrite every recipient field of `message` against `config`.
///
/// Absent fields stay absent. Fields are processed independently.
pub fn intercept<M: Recipients + ?Sized>(message: &mut M, config: &RewriteConfig) {
    let rewriter = Rewriter::new(config);

    for field in RecipientField::ALL {
        let Some(addresses) = message.recipients(field) else {
            continue;
        };

        let rewritten = rewriter.rewrite_field(Some(addresses.as_slice()), field.prefix());
        debug!(
            field = %field,
            recipients = rewritten.len(),
            changed = rewritten
                .iter()
                .zip(&addresses)
                .filter(|(new, old)| new != old)
                .count(),
            "Rewrote recipient field"
        );
        message.set_recipients(field, rewritten);
    }
}
