//! `pwm remove` — remove a site record from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{prompt_passphrase, vault_dir, Cli};
use crate::errors::{PwmError, Result};
use crate::vault::Vault;

/// Execute the `remove` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove site '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| PwmError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let passphrase = prompt_passphrase()?;
    let vault = Vault::open(&vault_dir(cli)?)?;
    let mut session = vault.unlock(&cli.user, passphrase.as_bytes())?;

    session.remove_site(name)?;

    #[cfg(feature = "audit-log")]
    crate::audit::log_audit(cli, "remove", Some(name), None);

    output::success(&format!("Removed site '{name}'"));

    Ok(())
}
