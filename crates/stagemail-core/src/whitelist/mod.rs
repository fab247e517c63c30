//! Whitelist Module
//!
//! Decides whether a recipient address is exempt from rewriting, by exact
//! or pattern match on the full address or on its domain.

mod entry;
mod matcher;

pub use entry::WhitelistEntry;
pub use matcher::{domain_of, is_whitelisted, Whitelist};
