//! Address Rewriter - Replaces non-whitelisted recipients with placeholders
//!
//! A rewritten address is derived deterministically from the original:
//! `@` becomes `_at_`, every character outside `[A-Za-z0-9_.]` becomes `-`,
//! the field prefix is prepended and the result is substituted into the
//! configured [`FormatTemplate`].

mod format;

pub use format::FormatTemplate;

use crate::settings::RewriteConfig;
use crate::whitelist::is_whitelisted;
use stagemail_common::bare_address;
use tracing::trace;

/// Build the obfuscated token for `address`, prefix included
pub fn obfuscation_token(address: &str, prefix: &str) -> String {
    let mut token = String::with_capacity(prefix.len() + address.len() + 8);
    token.push_str(prefix);
    for c in address.replace('@', "_at_").chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            token.push(c);
        } else {
            token.push('-');
        }
    }
    token
}

/// Obfuscate `address` and substitute it into `format`.
///
/// ```
/// use stagemail_core::rewriter::obfuscate;
///
/// assert_eq!(
///     obfuscate("foo+bar@example.com", "cc_", "staging+%s@example.com"),
///     "staging+cc_foo-bar_at_example.com@example.com"
/// );
/// ```
pub fn obfuscate(address: &str, prefix: &str, format: &str) -> String {
    format::render(format, &obfuscation_token(address, prefix))
}

/// Rewrites recipient lists against one configuration
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'a> {
    config: &'a RewriteConfig,
}

impl<'a> Rewriter<'a> {
    /// Create a rewriter reading `config`
    pub fn new(config: &'a RewriteConfig) -> Self {
        Self { config }
    }

    /// Rewrite one recipient.
    ///
    /// Whitelisted recipients are returned verbatim, display name included.
    /// Others are obfuscated from their bare address.
    pub fn rewrite_address(&self, raw: &str, prefix: &str) -> String {
        let address = bare_address(raw);
        if is_whitelisted(address, &self.config.whitelist) {
            trace!(address, "Keeping whitelisted recipient");
            return raw.to_string();
        }

        let rewritten = self
            .config
            .format
            .render(&obfuscation_token(address, prefix));
        trace!(address, rewritten = %rewritten, "Rewrote recipient");
        rewritten
    }

    /// Rewrite a recipient list element-wise, preserving order and length.
    ///
    /// An absent list rewrites to an empty one.
    pub fn rewrite_field(&self, addresses: Option<&[String]>, prefix: &str) -> Vec<String> {
        addresses
            .unwrap_or_default()
            .iter()
            .map(|address| self.rewrite_address(address, prefix))
            .collect()
    }
}
