//! stagemail Common - Shared types and utilities
//!
//! This crate provides the configuration file model, error types, logging
//! bootstrap and the outgoing message model shared by stagemail components.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::{bare_address, OutgoingMessage, RecipientField, Recipients};
