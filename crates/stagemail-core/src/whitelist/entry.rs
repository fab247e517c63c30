//! Whitelist entries

use regex::Regex;
use stagemail_common::config::EntrySetting;
use stagemail_common::Error;

/// A single whitelist entry
///
/// Literals require exact equality with the candidate. Patterns are
/// searched anywhere in the candidate, so `example\.com` matches
/// `sub.example.com.jp`; anchor with `^` and `$` for exact matching.
#[derive(Debug, Clone)]
pub enum WhitelistEntry {
    Literal(String),
    Pattern(Regex),
}

impl WhitelistEntry {
    /// Create a literal entry
    pub fn literal(value: impl Into<String>) -> Self {
        WhitelistEntry::Literal(value.into())
    }

    /// Compile a pattern entry
    pub fn pattern(source: &str) -> stagemail_common::Result<Self> {
        Regex::new(source)
            .map(WhitelistEntry::Pattern)
            .map_err(|source_err| Error::InvalidPattern {
                pattern: source.to_string(),
                source: source_err,
            })
    }

    /// Build an entry from its config file form
    pub fn from_setting(setting: &EntrySetting) -> stagemail_common::Result<Self> {
        match setting {
            EntrySetting::Literal(value) => Ok(Self::literal(value.as_str())),
            EntrySetting::Pattern { pattern } => Self::pattern(pattern),
        }
    }

    /// Test the entry against a candidate address or domain
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            WhitelistEntry::Literal(value) => value == candidate,
            WhitelistEntry::Pattern(regex) => regex.is_match(candidate),
        }
    }

    /// The literal value or the pattern source
    pub fn as_str(&self) -> &str {
        match self {
            WhitelistEntry::Literal(value) => value,
            WhitelistEntry::Pattern(regex) => regex.as_str(),
        }
    }

    /// Whether this entry is a pattern
    pub fn is_pattern(&self) -> bool {
        matches!(self, WhitelistEntry::Pattern(_))
    }
}

impl PartialEq for WhitelistEntry {
    fn eq(&self, other: &Self) -> bool {
        self.is_pattern() == other.is_pattern() && self.as_str() == other.as_str()
    }
}

impl Eq for WhitelistEntry {}

impl From<&str> for WhitelistEntry {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for WhitelistEntry {
    fn from(value: String) -> Self {
        Self::literal(value)
    }
}

impl From<Regex> for WhitelistEntry {
    fn from(regex: Regex) -> Self {
        WhitelistEntry::Pattern(regex)
    }
}
