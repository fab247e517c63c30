//! Whitelist Matcher - Decides which recipients are exempt from rewriting

use super::WhitelistEntry;
use stagemail_common::config::{EntrySetting, WhitelistSettings};
use tracing::trace;

/// Addresses and domains that are delivered unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    /// Entries matched against the full address
    pub addresses: Vec<WhitelistEntry>,
    /// Entries matched against the domain part
    pub domains: Vec<WhitelistEntry>,
}

impl Whitelist {
    /// Create an empty whitelist
    pub fn new() -> Self {
        Self::default()
    }

    /// Legacy flat whitelist: exact addresses only, no domains
    pub fn flat<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses
                .into_iter()
                .map(WhitelistEntry::literal)
                .collect(),
            domains: Vec::new(),
        }
    }

    /// Compile a whitelist from its config file form
    pub fn from_settings(settings: &WhitelistSettings) -> stagemail_common::Result<Self> {
        Ok(Self {
            addresses: compile(&settings.addresses)?,
            domains: compile(&settings.domains)?,
        })
    }

    /// Append an address entry
    pub fn add_address(&mut self, entry: impl Into<WhitelistEntry>) -> &mut Self {
        self.addresses.push(entry.into());
        self
    }

    /// Append a domain entry
    pub fn add_domain(&mut self, entry: impl Into<WhitelistEntry>) -> &mut Self {
        self.domains.push(entry.into());
        self
    }

    /// Replace all address entries
    pub fn set_addresses<I, E>(&mut self, entries: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<WhitelistEntry>,
    {
        self.addresses = entries.into_iter().map(Into::into).collect();
    }

    /// Replace all domain entries
    pub fn set_domains<I, E>(&mut self, entries: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<WhitelistEntry>,
    {
        self.domains = entries.into_iter().map(Into::into).collect();
    }

    /// Whether neither list has any entry
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty() && self.domains.is_empty()
    }

    /// Whether `address` or its domain matches an entry
    pub fn is_whitelisted(&self, address: &str) -> bool {
        is_whitelisted(address, self)
    }
}

fn compile(settings: &[EntrySetting]) -> stagemail_common::Result<Vec<WhitelistEntry>> {
    settings.iter().map(WhitelistEntry::from_setting).collect()
}

/// Domain part of an address: everything after the last `@`, empty if
/// there is none.
pub fn domain_of(address: &str) -> &str {
    address
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .unwrap_or("")
}

/// Whether `address` matches any address entry or its domain matches any
/// domain entry of `whitelist`.
pub fn is_whitelisted(address: &str, whitelist: &Whitelist) -> bool {
    if let Some(entry) = whitelist.addresses.iter().find(|e| e.matches(address)) {
        trace!(address, entry = entry.as_str(), "Address whitelisted");
        return true;
    }

    let domain = domain_of(address);
    if let Some(entry) = whitelist.domains.iter().find(|e| e.matches(domain)) {
        trace!(address, entry = entry.as_str(), "Domain whitelisted");
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_domain_of() {
        assert_eq!(domain_of("foo@example.com"), "example.com");
        assert_eq!(domain_of("\"a@b\"@example.com"), "example.com");
        assert_eq!(domain_of("foo@"), "");
        assert_eq!(domain_of("no-at-sign"), "");
        assert_eq!(domain_of(""), "");
    }

    #[test]
    fn test_empty_whitelist_matches_nothing() {
        let whitelist = Whitelist::new();

        assert!(whitelist.is_empty());
        assert!(!whitelist.is_whitelisted("foo@example.com"));
        assert!(!whitelist.is_whitelisted(""));
        assert!(!whitelist.is_whitelisted("no-at-sign"));
    }

    #[test]
    fn test_flat_whitelist() {
        let whitelist = Whitelist::flat(["foo@example.com", "bar@example.com"]);

        assert!(whitelist.domains.is_empty());
        assert!(whitelist.is_whitelisted("foo@example.com"));
        assert!(!whitelist.is_whitelisted("foo1@example.com"));
        assert!(!whitelist.is_whitelisted("foo@example.com.com"));
    }

    #[test]
    fn test_address_literal() {
        let mut whitelist = Whitelist::new();
        whitelist.add_address("foo@example.com");

        assert!(is_whitelisted("foo@example.com", &whitelist));
        assert!(!is_whitelisted("foo@example.com.com", &whitelist));
        assert!(!is_whitelisted("xfoo@example.com", &whitelist));
    }

    #[test]
    fn test_domain_literal() {
        let mut whitelist = Whitelist::new();
        whitelist.add_domain("example.com");

        assert!(whitelist.is_whitelisted("anyone@example.com"));
        assert!(!whitelist.is_whitelisted("anyone@example.com.jp"));
        assert!(!whitelist.is_whitelisted("anyone@sub.example.com"));
    }

    #[test]
    fn test_domain_pattern() {
        let mut whitelist = Whitelist::new();
        whitelist.add_domain(WhitelistEntry::pattern(r"example\.com").unwrap());

        assert!(whitelist.is_whitelisted("x@sub.example.com.jp"));
        assert!(whitelist.is_whitelisted("x@example.com"));
        assert!(!whitelist.is_whitelisted("x@example.org"));
    }

    #[test]
    fn test_anchored_domain_pattern() {
        let mut whitelist = Whitelist::new();
        whitelist.add_domain(WhitelistEntry::pattern(r"^example\.com$").unwrap());

        assert!(whitelist.is_whitelisted("x@example.com"));
        assert!(!whitelist.is_whitelisted("x@sub.example.com"));
    }

    #[test]
    fn test_address_pattern() {
        let mut whitelist = Whitelist::new();
        whitelist.add_address(WhitelistEntry::pattern(r"^ops\+.*@example\.com$").unwrap());

        assert!(whitelist.is_whitelisted("ops+alerts@example.com"));
        assert!(!whitelist.is_whitelisted("ops@example.com"));
    }

    #[test]
    fn test_empty_domain_matches_empty_entry_only() {
        let mut whitelist = Whitelist::new();
        whitelist.add_domain("example.com");
        assert!(!whitelist.is_whitelisted("no-at-sign"));

        whitelist.add_domain("");
        assert!(whitelist.is_whitelisted("no-at-sign"));
        assert!(whitelist.is_whitelisted("trailing@"));
    }

    #[test]
    fn test_set_lists_replace_entries() {
        let mut whitelist = Whitelist::new();
        whitelist.add_address("old@example.com").add_domain("old.org");

        whitelist.set_addresses(["new@example.com"]);
        whitelist.set_domains(Vec::<WhitelistEntry>::new());

        assert_eq!(whitelist.addresses, vec![WhitelistEntry::literal("new@example.com")]);
        assert!(whitelist.domains.is_empty());
        assert!(!whitelist.is_whitelisted("old@example.com"));
        assert!(!whitelist.is_whitelisted("a@old.org"));
    }

    #[test]
    fn test_duplicates_are_harmless() {
        let mut whitelist = Whitelist::new();
        whitelist.add_address("a@b.c").add_address("a@b.c");

        assert!(whitelist.is_whitelisted("a@b.c"));
        assert_eq!(whitelist.addresses.len(), 2);
    }

    #[test]
    fn test_from_settings() {
        let settings = WhitelistSettings {
            addresses: vec![EntrySetting::Literal("bar@bar.org".into())],
            domains: vec![EntrySetting::Pattern {
                pattern: r"\.jp$".into(),
            }],
        };

        let whitelist = Whitelist::from_settings(&settings).unwrap();
        assert!(whitelist.is_whitelisted("bar@bar.org"));
        assert!(whitelist.is_whitelisted("foo@foo.jp"));
        assert!(!whitelist.is_whitelisted("foo@foo.fr"));
    }

    #[test]
    fn test_from_settings_invalid_pattern() {
        let settings = WhitelistSettings {
            addresses: Vec::new(),
            domains: vec![EntrySetting::Pattern {
                pattern: "(".into(),
            }],
        };

        assert!(Whitelist::from_settings(&settings).is_err());
    }
}
