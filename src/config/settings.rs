use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{PwmError, Result};

/// Project-level configuration, loaded from `.pwm.toml`.
///
/// Every field has a sensible default so pwm works out-of-the-box
/// without any config file at all.  The KDF tuning only applies at
/// account creation — unlock always uses the params stored in the
/// account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_kdf_memory_kib")]
    pub kdf_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_kdf_parallelism")]
    pub kdf_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_kdf_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_kdf_iterations() -> u32 {
    3
}

fn default_kdf_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            kdf_memory_kib: default_kdf_memory_kib(),
            kdf_iterations: default_kdf_iterations(),
            kdf_parallelism: default_kdf_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".pwm.toml";

    /// Load settings from `<project_dir>/.pwm.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PwmError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Convert the KDF settings into crypto-layer params.
    pub fn kdf_params(&self) -> crate::crypto::KdfParams {
        crate::crypto::KdfParams {
            algorithm: crate::crypto::KdfAlgorithm::Argon2id,
            memory_kib: self.kdf_memory_kib,
            iterations: self.kdf_iterations,
            parallelism: self.kdf_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.kdf_memory_kib, 65_536);
        assert_eq!(settings.kdf_iterations, 3);
        assert_eq!(settings.kdf_parallelism, 4);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".pwm.toml"), "kdf_iterations = 5\n").unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.kdf_iterations, 5);
        assert_eq!(settings.kdf_memory_kib, 65_536);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".pwm.toml"), "kdf_iterations = [oops\n").unwrap();

        assert!(Settings::load(dir.path()).is_err());
    }

    #[test]
    fn kdf_params_carry_the_tuning() {
        let settings = Settings {
            kdf_memory_kib: 32_768,
            kdf_iterations: 2,
            kdf_parallelism: 1,
        };
        let params = settings.kdf_params();
        assert_eq!(params.memory_kib, 32_768);
        assert_eq!(params.iterations, 2);
        assert_eq!(params.parallelism, 1);
    }
}
