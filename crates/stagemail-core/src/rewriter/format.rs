//! Format templates for rewritten addresses

use stagemail_common::config::default_format;
use stagemail_common::Error;
use std::fmt;
use std::str::FromStr;

/// Template with at most one `%s` slot; `%%` renders a literal `%`.
///
/// A template without a slot renders to itself whatever the token, which
/// sends every rewritten recipient to one fixed address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTemplate {
    source: String,
}

impl FormatTemplate {
    /// Parse a template, rejecting more than one `%s` slot
    pub fn parse(source: &str) -> stagemail_common::Result<Self> {
        let slots = count_slots(source);
        if slots > 1 {
            return Err(Error::Validation(format!(
                "format {:?} has {} %s slots, expected at most one",
                source, slots
            )));
        }
        Ok(Self {
            source: source.to_string(),
        })
    }

    /// The template as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the template has a `%s` slot
    pub fn has_slot(&self) -> bool {
        count_slots(&self.source) > 0
    }

    /// Substitute `token` into the slot
    pub fn render(&self, token: &str) -> String {
        render(&self.source, token)
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self {
            source: default_format(),
        }
    }
}

impl fmt::Display for FormatTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for FormatTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn count_slots(format: &str) -> usize {
    let mut slots = 0;
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        match chars.peek() {
            Some('s') => {
                slots += 1;
                chars.next();
            }
            Some('%') => {
                chars.next();
            }
            _ => {}
        }
    }
    slots
}

/// Substitute `token` into the first `%s` of `format`.
///
/// Later `%s` sequences are kept literally and any other `%` is copied
/// through, so every input renders.
pub(crate) fn render(format: &str, token: &str) -> String {
    let mut out = String::with_capacity(format.len() + token.len());
    let mut filled = false;
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') if !filled => {
                chars.next();
                out.push_str(token);
                filled = true;
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_passthrough() {
        let template = FormatTemplate::default();
        assert_eq!(template.as_str(), "%s");
        assert_eq!(template.render("foo_at_example.com"), "foo_at_example.com");
    }

    #[test]
    fn test_render_slot() {
        let template = FormatTemplate::parse("staging+%s@example.com").unwrap();
        assert!(template.has_slot());
        assert_eq!(template.render("tok"), "staging+tok@example.com");
    }

    #[test]
    fn test_render_without_slot() {
        let template = FormatTemplate::parse("staging_mail@example.com").unwrap();
        assert!(!template.has_slot());
        assert_eq!(template.render("anything"), "staging_mail@example.com");
    }

    #[test]
    fn test_percent_escape() {
        let template = FormatTemplate::parse("100%%+%s@example.com").unwrap();
        assert_eq!(template.render("tok"), "100%+tok@example.com");
        assert_eq!(render("%%s", "tok"), "%s");
    }

    #[test]
    fn test_stray_percent_is_literal() {
        assert_eq!(render("a%d%", "tok"), "a%d%");
    }

    #[test]
    fn test_multiple_slots_rejected() {
        let err = FormatTemplate::parse("%s+%s@example.com").unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!("%s-%s".parse::<FormatTemplate>().is_err());
    }

    #[test]
    fn test_render_fills_first_slot_only() {
        assert_eq!(render("%s+%s", "tok"), "tok+%s");
    }
}
