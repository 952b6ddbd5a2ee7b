use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in pwm.
///
/// Authentication failures deliberately share one variant with one fixed
/// message: wrong passphrase, unknown account, and tampered ciphertext are
/// indistinguishable to the caller.
#[derive(Debug, Error)]
pub enum PwmError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication failed — incorrect credentials or corrupted data")]
    AuthFailure,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Store errors ---
    #[error("'{0}' not found")]
    NotFound(String),

    #[error("'{0}' already exists")]
    AlreadyExists(String),

    #[error("Store file {path} holds schema '{found}', expected '{expected}'")]
    SchemaMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Invalid store format in {path}: {reason}")]
    InvalidStoreFormat { path: PathBuf, reason: String },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for pwm results.
pub type Result<T> = std::result::Result<T, PwmError>;
