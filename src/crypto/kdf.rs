//! Passphrase-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  The parameters used at account creation are stored
//! in the account record, so every later unlock reproduces the exact same
//! derived key.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::KEY_LEN;
use crate::errors::{PwmError, Result};

/// Length of the salt in bytes (256 bits).
const SALT_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// KDF algorithm identifier, persisted alongside the parameters so a
/// future algorithm change stays distinguishable on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KdfAlgorithm {
    Argon2id,
}

/// Argon2id parameters, persisted in every account record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KdfParams {
    /// Which KDF produced the passphrase key.
    pub algorithm: KdfAlgorithm,
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            algorithm: KdfAlgorithm::Argon2id,
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Derive a 32-byte passphrase key from a passphrase and salt.
///
/// The same passphrase + salt + params always produce the same key.
/// Enforces minimum parameters to prevent dangerously weak KDF settings.
pub fn derive_passphrase_key(
    passphrase: &[u8],
    salt: &[u8],
    kdf_params: &KdfParams,
) -> Result<[u8; KEY_LEN]> {
    if kdf_params.memory_kib < MIN_MEMORY_KIB {
        return Err(PwmError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            kdf_params.memory_kib
        )));
    }
    if kdf_params.iterations < 1 {
        return Err(PwmError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if kdf_params.parallelism < 1 {
        return Err(PwmError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        kdf_params.memory_kib,
        kdf_params.iterations,
        kdf_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| PwmError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt, &mut key)
        .map_err(|e| PwmError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
