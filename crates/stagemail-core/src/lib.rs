//! stagemail Core - Recipient rewriting for non-production mail delivery
//!
//! Before a message is delivered, every To/Cc/Bcc recipient that is not
//! whitelisted is replaced with a deterministic placeholder derived from
//! the original address, so staging environments never reach real
//! recipients while each placeholder still identifies who it stands for.
//!
//! ```
//! use stagemail_common::OutgoingMessage;
//! use stagemail_core::{ConfigHandle, Interceptor};
//!
//! let config = ConfigHandle::default();
//! config
//!     .update(|c| {
//!         c.set_format("staging+%s@example.com")?;
//!         c.whitelist.add_address("bar@bar.org");
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let mut message = OutgoingMessage::new().with_to(["foo@foo.com", "bar@bar.org"]);
//! Interceptor::new(config).intercept(&mut message);
//!
//! assert_eq!(
//!     message.to.unwrap(),
//!     ["staging+foo_at_foo.com@example.com", "bar@bar.org"]
//! );
//! ```

pub mod interceptor;
pub mod rewriter;
pub mod settings;
pub mod whitelist;

pub use interceptor::{intercept, Interceptor};
pub use rewriter::{obfuscate, FormatTemplate, Rewriter};
pub use settings::{ConfigHandle, RewriteConfig};
pub use whitelist::{is_whitelisted, Whitelist, WhitelistEntry};
