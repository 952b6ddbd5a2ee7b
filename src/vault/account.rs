//! The persisted account record.
//!
//! An account is created once and only ever read afterwards: the salt is
//! immutable, and the wrapped data key changes only if passphrase rotation
//! is ever added (it would re-wrap this one blob).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::KdfParams;
use crate::store::{base64_decode, base64_encode, Document};

/// One vault user.  Stored in `accounts.json`, keyed by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Random salt fed to the KDF together with the passphrase.
    /// Serialized as a base64 string in JSON.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// KDF algorithm and cost parameters used at creation.  Unlock
    /// always uses these, never the current config file.
    pub kdf: KdfParams,

    /// The data key, envelope-encrypted under the passphrase key
    /// (nonce + ciphertext + tag).  Serialized as base64.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub wrapped_data_key: Vec<u8>,

    /// When this account was created.
    pub created_at: DateTime<Utc>,
}

impl Document for Account {
    const SCHEMA: &'static str = "pwm.accounts.v1";
}
