//! Vault module — accounts, site records, and the unlock service.
//!
//! This module provides:
//! - The persisted `Account` record (`account`)
//! - The persisted `Site` record and its display summary (`site`)
//! - The `Vault` / `Session` service layer composing KDF, envelope
//!   encryption, and the document stores (`service`)

pub mod account;
pub mod service;
pub mod site;

// Re-export the most commonly used items.
pub use account::Account;
pub use service::{Session, Vault};
pub use site::{Site, SiteSummary};
