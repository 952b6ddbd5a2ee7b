//! The per-account data key and HKDF-SHA256 per-record sub-keys.
//!
//! A `DataKey` is random 256-bit key material generated once at account
//! creation.  It never touches disk in plaintext — it is stored wrapped
//! (see `envelope`) and lives in memory only while a session is unlocked.
//!
//! Individual record fields are not encrypted with the data key directly:
//! each record name gets its own sub-key via HKDF (RFC 5869), using the
//! data key as input keying material and `"pwm-site:<name>"` as the
//! context string.  Compromising one record key reveals nothing about
//! the others.

use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use super::KEY_LEN;
use crate::errors::{PwmError, Result};

/// Derive the encryption sub-key for a single record.
///
/// `info` is set to `"pwm-site:<record_name>"` to bind the derived key
/// to one record name.
pub fn derive_record_key(data_key: &[u8], record_name: &str) -> Result<[u8; KEY_LEN]> {
    let info = format!("pwm-site:{record_name}");

    // Skip the extract step: the data key is already uniform random,
    // so it serves directly as the PRK.
    let hk = Hkdf::<Sha256>::new(None, data_key);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info.as_bytes(), &mut okm)
        .map_err(|e| PwmError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// A 32-byte data key that zeroes its memory when dropped.
///
/// Dropping the `DataKey` on every exit path — normal return, error, or
/// panic unwind — is what ends an unlocked session.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DataKey {
    bytes: [u8; KEY_LEN],
}

impl DataKey {
    /// Wrap existing raw bytes (e.g. freshly unwrapped from an envelope).
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generate a fresh random data key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Access the raw key bytes (to wrap, or to feed HKDF).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Derive the encryption sub-key for one record name.
    pub fn derive_record_key(&self, record_name: &str) -> Result<[u8; KEY_LEN]> {
        derive_record_key(&self.bytes, record_name)
    }
}
