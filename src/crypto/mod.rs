//! Cryptographic primitives for pwm.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption (`cipher`)
//! - Argon2id passphrase-based key derivation (`kdf`)
//! - The random per-account data key and HKDF per-record sub-keys (`keys`)
//! - Envelope encryption of the data key (`envelope`)

pub mod cipher;
pub mod envelope;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_passphrase_key, ...};
pub use cipher::{decrypt, encrypt};
pub use envelope::{unwrap_data_key, wrap_data_key};
pub use kdf::{derive_passphrase_key, generate_salt, KdfAlgorithm, KdfParams};
pub use keys::{derive_record_key, DataKey};

/// Length of every symmetric key in this crate (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;
