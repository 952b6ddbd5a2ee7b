//! Site record types stored inside a vault.
//!
//! The record name (e.g. "github") is the store key and is not repeated
//! inside the record.  The login stays plaintext so `list` can show it;
//! only the password field is ciphertext.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{base64_decode, base64_encode, Document};

/// A single credential record.  Stored in `<username>.sites.json`,
/// keyed by the user-chosen site name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// The login / account identifier for the site (plaintext).
    pub login: String,

    /// The password, encrypted under this record's sub-key
    /// (nonce + ciphertext + tag).  Serialized as base64.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub encrypted_password: Vec<u8>,

    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

impl Document for Site {
    const SCHEMA: &'static str = "pwm.sites.v1";
}

/// Lightweight listing row for a site (no ciphertext).
#[derive(Debug, Clone)]
pub struct SiteSummary {
    pub name: String,
    pub login: String,
    pub created_at: DateTime<Utc>,
}
