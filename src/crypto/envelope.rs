//! Envelope encryption of the data key.
//!
//! The data key is encrypted under the passphrase-derived key with the
//! same AEAD used for record fields, and the resulting blob is what the
//! account record stores.  The passphrase key never touches record
//! ciphertext, so a future passphrase change only has to re-wrap one
//! 32-byte key instead of re-encrypting every record.

use zeroize::Zeroize;

use super::cipher::{decrypt, encrypt};
use super::keys::DataKey;
use super::KEY_LEN;
use crate::errors::{PwmError, Result};

/// Wrap (encrypt) the data key under the passphrase-derived key.
///
/// Returns the opaque blob to persist in the account record.
pub fn wrap_data_key(data_key: &DataKey, passphrase_key: &[u8; KEY_LEN]) -> Result<Vec<u8>> {
    encrypt(passphrase_key, data_key.as_bytes())
}

/// Unwrap (decrypt) a data key from a wrapped blob.
///
/// Fails closed with `AuthFailure` on a wrong key or any tampering; an
/// unwrapped payload of the wrong length is rejected the same way rather
/// than handed downstream.
pub fn unwrap_data_key(wrapped: &[u8], passphrase_key: &[u8; KEY_LEN]) -> Result<DataKey> {
    let mut plaintext = decrypt(passphrase_key, wrapped)?;

    if plaintext.len() != KEY_LEN {
        plaintext.zeroize();
        return Err(PwmError::AuthFailure);
    }

    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&plaintext);
    plaintext.zeroize();

    Ok(DataKey::new(bytes))
}
