//! High-level vault operations used by CLI commands.
//!
//! `Vault` handles the locked side: account creation and unlock.  A
//! successful unlock yields a `Session` holding the plaintext data key;
//! every record operation lives on `Session`, so nothing can touch
//! ciphertext without having authenticated first.  The data key zeroes
//! itself when the `Session` is dropped, on every exit path.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use zeroize::Zeroize;

use crate::crypto::cipher::{decrypt, encrypt};
use crate::crypto::envelope::{unwrap_data_key, wrap_data_key};
use crate::crypto::kdf::{derive_passphrase_key, generate_salt, KdfParams};
use crate::crypto::keys::DataKey;
use crate::errors::{PwmError, Result};
use crate::store::DocumentStore;

use super::account::Account;
use super::site::{Site, SiteSummary};

/// File holding all account records.
const ACCOUNTS_FILE: &str = "accounts.json";

/// The locked vault: a directory with an account store and one site
/// store per account.
pub struct Vault {
    dir: PathBuf,
    accounts: DocumentStore<Account>,
}

impl Vault {
    /// Open the vault at `dir`, creating the directory and an empty
    /// account store on first use.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let accounts = DocumentStore::open(&dir.join(ACCOUNTS_FILE))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            accounts,
        })
    }

    /// Returns `true` if an account with this username exists.
    pub fn account_exists(&self, username: &str) -> bool {
        self.accounts.contains(username)
    }

    /// Create a new account.
    ///
    /// Generates a random salt and a random data key, derives the
    /// passphrase key, wraps the data key under it, and persists the
    /// account.  Fails with `AlreadyExists` if the username is taken.
    pub fn create_account(
        &mut self,
        username: &str,
        passphrase: &[u8],
        kdf_params: &KdfParams,
    ) -> Result<()> {
        if self.accounts.contains(username) {
            return Err(PwmError::AlreadyExists(username.to_string()));
        }

        let salt = generate_salt();
        let data_key = DataKey::generate();

        let mut passphrase_key = derive_passphrase_key(passphrase, &salt, kdf_params)?;
        let wrapped = wrap_data_key(&data_key, &passphrase_key);
        passphrase_key.zeroize();

        let account = Account {
            salt: salt.to_vec(),
            kdf: *kdf_params,
            wrapped_data_key: wrapped?,
            created_at: Utc::now(),
        };

        self.accounts.insert(username, account)
    }

    /// Authenticate and unlock an account.
    ///
    /// Derives the passphrase key with the account's stored salt and KDF
    /// params, then unwraps the data key.  An unknown username and a
    /// wrong passphrase both surface as the same `AuthFailure` so error
    /// text cannot be used to enumerate accounts.
    pub fn unlock(&self, username: &str, passphrase: &[u8]) -> Result<Session> {
        let account = self
            .accounts
            .get(username)
            .map_err(|_| PwmError::AuthFailure)?;

        let mut passphrase_key = derive_passphrase_key(passphrase, &account.salt, &account.kdf)?;
        let unwrapped = unwrap_data_key(&account.wrapped_data_key, &passphrase_key);
        passphrase_key.zeroize();

        // Tag mismatch propagates as AuthFailure.
        let data_key = unwrapped?;

        let sites = DocumentStore::open(&self.sites_path(username))?;

        Ok(Session { data_key, sites })
    }

    /// Path of the site store belonging to one account.
    fn sites_path(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{username}.sites.json"))
    }
}

/// An unlocked vault session for one account.
///
/// Holds the plaintext data key for the duration of one CLI invocation.
/// Dropping the session zeroizes the key.
pub struct Session {
    data_key: DataKey,
    sites: DocumentStore<Site>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("data_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Add a new site record.
    ///
    /// The password is encrypted under this record's sub-key; the
    /// sub-key is zeroized immediately after use.  Fails with
    /// `AlreadyExists` if the name is taken.
    pub fn add_site(&mut self, name: &str, login: &str, password: &str) -> Result<()> {
        validate_site_name(name)?;
        if self.sites.contains(name) {
            return Err(PwmError::AlreadyExists(name.to_string()));
        }

        let mut record_key = self.data_key.derive_record_key(name)?;
        let encrypted_password = encrypt(&record_key, password.as_bytes());
        record_key.zeroize();

        let site = Site {
            login: login.to_string(),
            encrypted_password: encrypted_password?,
            created_at: Utc::now(),
        };

        self.sites.insert(name, site)
    }

    /// Decrypt and return a site's password.
    pub fn password(&self, name: &str) -> Result<String> {
        validate_site_name(name)?;
        let site = self.sites.get(name)?;

        let mut record_key = self.data_key.derive_record_key(name)?;
        let plaintext = decrypt(&record_key, &site.encrypted_password);
        record_key.zeroize();

        // On a non-UTF-8 payload, zeroize the bytes inside the error
        // before discarding them.
        String::from_utf8(plaintext?).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            PwmError::SerializationError("password is not valid UTF-8".to_string())
        })
    }

    /// Return a site's login (stored plaintext, no decryption).
    pub fn login(&self, name: &str) -> Result<String> {
        validate_site_name(name)?;
        Ok(self.sites.get(name)?.login.clone())
    }

    /// Remove a site record.
    pub fn remove_site(&mut self, name: &str) -> Result<()> {
        validate_site_name(name)?;
        self.sites.remove(name)
    }

    /// Remove every site record.  Idempotent.
    pub fn drop_all_sites(&mut self) -> Result<()> {
        self.sites.drop_all()
    }

    /// List all sites, sorted by name.
    pub fn list_sites(&self) -> Vec<SiteSummary> {
        self.sites
            .iter()
            .map(|(name, site)| SiteSummary {
                name: name.clone(),
                login: site.login.clone(),
                created_at: site.created_at,
            })
            .collect()
    }

    /// Number of site records.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Returns `true` if a site with the given name exists.
    ///
    /// Metadata-only check, no decryption.
    pub fn contains_site(&self, name: &str) -> bool {
        self.sites.contains(name)
    }
}

/// Validate that a site name is sane before it is used as a store key
/// and an HKDF context.
///
/// Must be non-empty, at most 256 characters, and free of control
/// characters.
fn validate_site_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PwmError::CommandFailed("site name cannot be empty".into()));
    }
    if name.len() > 256 {
        return Err(PwmError::CommandFailed(
            "site name cannot exceed 256 characters".into(),
        ));
    }
    if name.chars().any(char::is_control) {
        return Err(PwmError::CommandFailed(format!(
            "site name '{}' contains control characters",
            name.escape_default()
        )));
    }
    Ok(())
}
