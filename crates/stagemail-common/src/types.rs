//! Common types for stagemail

use serde::{Deserialize, Serialize};

/// Recipient header of an outgoing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientField {
    To,
    Cc,
    Bcc,
}

impl RecipientField {
    /// All recipient fields, in processing order
    pub const ALL: [RecipientField; 3] = [
        RecipientField::To,
        RecipientField::Cc,
        RecipientField::Bcc,
    ];

    /// Prefix prepended to obfuscated addresses coming from this field
    pub fn prefix(self) -> &'static str {
        match self {
            RecipientField::To => "",
            RecipientField::Cc => "cc_",
            RecipientField::Bcc => "bcc_",
        }
    }

    /// Header name as written in a message
    pub fn header_name(self) -> &'static str {
        match self {
            RecipientField::To => "To",
            RecipientField::Cc => "Cc",
            RecipientField::Bcc => "Bcc",
        }
    }
}

impl std::fmt::Display for RecipientField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header_name())
    }
}

/// Access to the recipient lists of a message about to be delivered.
///
/// `None` means the field is not present on the message, which is not the
/// same as a present but empty field.
pub trait Recipients {
    /// Current addresses of `field`
    fn recipients(&self, field: RecipientField) -> Option<Vec<String>>;

    /// Replace the addresses of `field`
    fn set_recipients(&mut self, field: RecipientField, addresses: Vec<String>);
}

/// Minimal outgoing message carrying sender, subject and recipient lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub from: Option<String>,
    pub subject: Option<String>,
    pub to: Option<Vec<String>>,
    pub cc: Option<Vec<String>>,
    pub bcc: Option<Vec<String>>,
}

impl OutgoingMessage {
    /// Create an empty message
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the subject
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the To addresses
    pub fn with_to<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to = Some(addresses.into_iter().map(Into::into).collect());
        self
    }

    /// Set the Cc addresses
    pub fn with_cc<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cc = Some(addresses.into_iter().map(Into::into).collect());
        self
    }

    /// Set the Bcc addresses
    pub fn with_bcc<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bcc = Some(addresses.into_iter().map(Into::into).collect());
        self
    }

    fn field_mut(&mut self, field: RecipientField) -> &mut Option<Vec<String>> {
        match field {
            RecipientField::To => &mut self.to,
            RecipientField::Cc => &mut self.cc,
            RecipientField::Bcc => &mut self.bcc,
        }
    }
}

impl Recipients for OutgoingMessage {
    fn recipients(&self, field: RecipientField) -> Option<Vec<String>> {
        match field {
            RecipientField::To => self.to.clone(),
            RecipientField::Cc => self.cc.clone(),
            RecipientField::Bcc => self.bcc.clone(),
        }
    }

    fn set_recipients(&mut self, field: RecipientField, addresses: Vec<String>) {
        *self.field_mut(field) = Some(addresses);
    }
}

/// Extract the addr-spec from a mailbox such as `Jane Doe <jane@example.com>`
/// or `jane@example.com (Jane Doe)`.
///
/// One trailing `(...)` comment is dropped, then a trailing `<...>` group is
/// unwrapped. Nested comments and comments inside the address are kept.
pub fn bare_address(raw: &str) -> &str {
    let mut trimmed = raw.trim_end();
    if let Some(inner) = trimmed.strip_suffix(')') {
        if let Some(open) = inner.rfind('(') {
            trimmed = inner[..open].trim_end();
        }
    }
    if let Some(inner) = trimmed.strip_suffix('>') {
        if let Some(open) = inner.rfind('<') {
            return inner[open + 1..].trim();
        }
    }
    if trimmed.len() == raw.len() {
        raw
    } else {
        trimmed.trim_start()
    }
}
