//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod clipboard;
pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::errors::{PwmError, Result};

/// Minimum passphrase length to prevent trivially weak passphrases.
const MIN_PASSPHRASE_LEN: usize = 8;

/// pwm CLI: local encrypted password manager.
#[derive(Parser)]
#[command(name = "pwm", about = "Local encrypted password manager", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Account username (default: main)
    #[arg(short, long, default_value = "main", global = true)]
    pub user: String,

    /// Vault directory (default: .pwm)
    #[arg(long, default_value = ".pwm", global = true)]
    pub vault_dir: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new account in the vault
    Init,

    /// Add a new site record
    Add {
        /// Site name (e.g. github)
        name: String,
        /// Login for the site (omit for interactive prompt)
        #[arg(short, long)]
        login: Option<String>,
    },

    /// Get a site's password (copied to clipboard by default)
    Get {
        /// Site name
        name: String,
        /// Copy the login instead of the password
        #[arg(short, long)]
        login: bool,
        /// Print to stdout instead of copying to the clipboard
        #[arg(long)]
        show: bool,
    },

    /// Remove a site record
    Remove {
        /// Site name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List all site records
    List,

    /// Remove every site record for this account
    Drop {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// View the audit log of vault operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master passphrase, trying in order:
/// 1. `PWM_PASSPHRASE` env var (CI/CD, scripting)
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("PWM_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master passphrase")
        .interact()
        .map_err(|e| PwmError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation (used during `init`).
///
/// Also respects `PWM_PASSPHRASE` for scripted usage.
/// Enforces a minimum passphrase length.
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_new_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("PWM_PASSPHRASE") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSPHRASE_LEN {
                return Err(PwmError::CommandFailed(format!(
                    "passphrase must be at least {MIN_PASSPHRASE_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let passphrase = dialoguer::Password::new()
            .with_prompt("Choose master passphrase")
            .with_confirmation(
                "Confirm master passphrase",
                "Passphrases do not match, try again",
            )
            .interact()
            .map_err(|e| PwmError::CommandFailed(format!("passphrase prompt: {e}")))?;

        if passphrase.len() < MIN_PASSPHRASE_LEN {
            output::warning(&format!(
                "Passphrase must be at least {MIN_PASSPHRASE_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(passphrase));
    }
}

/// Build the full path of the vault directory from the CLI arguments.
///
/// Example: `<cwd>/.pwm`
pub fn vault_dir(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(&cli.vault_dir))
}

/// Validate that a username is safe and sensible.
///
/// Allowed: lowercase letters, digits, hyphens, underscores. Must not be
/// empty or start with a hyphen. Max length 64 characters.  Usernames
/// become file names (`<user>.sites.json`), so this also keeps paths sane.
pub fn validate_username(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PwmError::ConfigError("username cannot be empty".into()));
    }

    if name.len() > 64 {
        return Err(PwmError::ConfigError(
            "username cannot exceed 64 characters".into(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(PwmError::ConfigError(format!(
            "username '{name}' is invalid — only lowercase letters, digits, hyphens, and underscores are allowed"
        )));
    }

    if name.starts_with('-') {
        return Err(PwmError::ConfigError(format!(
            "username '{name}' cannot start with a hyphen"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_usernames() {
        assert!(validate_username("main").is_ok());
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("bob-2").is_ok());
        assert!(validate_username("work_account").is_ok());
    }

    #[test]
    fn rejects_empty_username() {
        assert!(validate_username("").is_err());
    }

    #[test]
    fn rejects_uppercase() {
        assert!(validate_username("Alice").is_err());
        assert!(validate_username("BOB").is_err());
    }

    #[test]
    fn rejects_path_characters() {
        assert!(validate_username("alice/../etc").is_err());
        assert!(validate_username("alice.json").is_err());
        assert!(validate_username("a b").is_err());
    }

    #[test]
    fn rejects_leading_hyphen() {
        assert!(validate_username("-alice").is_err());
    }

    #[test]
    fn rejects_too_long_username() {
        let long_name = "a".repeat(65);
        assert!(validate_username(&long_name).is_err());
    }
}
