//! Typed document store — schema-tagged keyed persistence.
//!
//! A `DocumentStore<T>` keeps a `name -> T` mapping in one JSON file:
//!
//! ```json
//! {
//!   "schema": "pwm.sites.v1",
//!   "records": { "github": { ... }, "mail": { ... } }
//! }
//! ```
//!
//! - **schema**: identity tag of the record type.  Checked against
//!   `T::SCHEMA` *before* any record is deserialized; a mismatch is a
//!   fatal `SchemaMismatch`, never a best-effort parse.
//! - **records**: a `BTreeMap`, so serialized output is key-sorted and
//!   a saved file is byte-reproducible for the same contents.
//!
//! Every mutating operation serializes the full in-memory state and
//! atomically replaces the backing file (write temp, then rename), so a
//! crash can never leave a half-written file that still parses.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{PwmError, Result};

/// A record type that can live in a `DocumentStore`.
///
/// `SCHEMA` is the explicit identity tag written to the store file —
/// bump it when the record layout changes incompatibly.
pub trait Document: Serialize + DeserializeOwned {
    const SCHEMA: &'static str;
}

/// On-disk shape of a store file, minus the schema tag (which the
/// probe below has already checked by the time records are parsed).
#[derive(Deserialize)]
struct StoreFile<T> {
    records: BTreeMap<String, T>,
}

/// Borrowing counterpart of `StoreFile`, used when saving.
#[derive(Serialize)]
struct StoreFileRef<'a, T> {
    schema: &'a str,
    records: &'a BTreeMap<String, T>,
}

/// Minimal probe used to read the schema tag without touching records.
#[derive(Deserialize)]
struct SchemaProbe {
    schema: String,
}

/// A keyed collection of `T` records backed by one JSON file.
pub struct DocumentStore<T: Document> {
    path: PathBuf,
    records: BTreeMap<String, T>,
}

impl<T: Document> DocumentStore<T> {
    /// Open the store at `path`, creating it if absent.
    ///
    /// A missing file becomes an empty store that is persisted
    /// immediately, so the file always exists after first use.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            let store = Self {
                path: path.to_path_buf(),
                records: BTreeMap::new(),
            };
            store.save()?;
            return Ok(store);
        }

        let data = fs::read_to_string(path)?;

        // Check the schema tag first — records of a foreign schema must
        // never reach T's deserializer.
        let probe: SchemaProbe =
            serde_json::from_str(&data).map_err(|e| PwmError::InvalidStoreFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if probe.schema != T::SCHEMA {
            return Err(PwmError::SchemaMismatch {
                path: path.to_path_buf(),
                expected: T::SCHEMA.to_string(),
                found: probe.schema,
            });
        }

        let file: StoreFile<T> =
            serde_json::from_str(&data).map_err(|e| PwmError::InvalidStoreFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            records: file.records,
        })
    }

    /// Fetch the record stored under `name`.
    pub fn get(&self, name: &str) -> Result<&T> {
        self.records
            .get(name)
            .ok_or_else(|| PwmError::NotFound(name.to_string()))
    }

    /// Insert a new record under `name` and persist.
    ///
    /// Fails with `AlreadyExists` if the name is taken, leaving the
    /// prior record untouched on disk and in memory.
    pub fn insert(&mut self, name: &str, record: T) -> Result<()> {
        if self.records.contains_key(name) {
            return Err(PwmError::AlreadyExists(name.to_string()));
        }
        self.records.insert(name.to_string(), record);
        self.save()
    }

    /// Remove the record under `name` and persist.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if self.records.remove(name).is_none() {
            return Err(PwmError::NotFound(name.to_string()));
        }
        self.save()
    }

    /// Remove every record and persist.  Idempotent.
    pub fn drop_all(&mut self) -> Result<()> {
        self.records.clear();
        self.save()
    }

    /// Iterate over `(name, record)` pairs in key order.
    ///
    /// The order is a serialization artifact, not a semantic guarantee.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &T)> {
        self.records.iter()
    }

    /// Returns `true` if a record with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Number of records currently in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the full state and atomically replace the backing file.
    ///
    /// The temp file lives in the same directory as the target so the
    /// rename stays on one filesystem and is atomic.
    fn save(&self) -> Result<()> {
        let file = StoreFileRef {
            schema: T::SCHEMA,
            records: &self.records,
        };

        let mut buf = serde_json::to_vec_pretty(&file)
            .map_err(|e| PwmError::SerializationError(format!("store: {e}")))?;
        buf.push(b'\n');

        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &buf)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
