//! `pwm init` — create a new account in the vault.

use crate::cli::output;
use crate::cli::{prompt_new_passphrase, vault_dir, Cli};
use crate::config::Settings;
use crate::errors::{PwmError, Result};
use crate::vault::Vault;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let dir = vault_dir(cli)?;

    // Opening creates the directory and an empty account store on
    // first use.
    let mut vault = Vault::open(&dir)?;

    if vault.account_exists(&cli.user) {
        output::tip("Use `pwm add <name>` to store credentials for the existing account.");
        return Err(PwmError::AlreadyExists(cli.user.clone()));
    }

    // Prompt for a new passphrase (with confirmation).
    let passphrase = prompt_new_passphrase()?;

    // KDF tuning comes from .pwm.toml (or defaults) and is persisted
    // in the account record.
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    vault.create_account(&cli.user, passphrase.as_bytes(), &settings.kdf_params())?;

    output::success(&format!(
        "Account '{}' created in vault at {}",
        cli.user,
        dir.display()
    ));

    #[cfg(feature = "audit-log")]
    crate::audit::log_audit(cli, "init", None, Some("account created"));

    output::tip("Run `pwm add <name>` to store a credential.");
    output::tip("Run `pwm get <name>` to copy a password to the clipboard.");

    Ok(())
}
