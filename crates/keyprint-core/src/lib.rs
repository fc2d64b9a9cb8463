//! Keyprint Core Library
//!
//! Keystore discovery, certificate fingerprint extraction, and source
//! orchestration for the keyprint diagnostic CLI.

pub mod aggregator;
pub mod bridge;
pub mod error;
pub mod inspector;
pub mod locator;
pub mod parser;
pub mod record;

pub use error::{KeyprintError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
