//! `pwm drop` — remove every site record for this account.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{prompt_passphrase, vault_dir, Cli};
use crate::errors::{PwmError, Result};
use crate::vault::Vault;

/// Execute the `drop` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove ALL site records for account '{}'? This cannot be undone.",
                cli.user
            ))
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

    let count = session.site_count();
    session.drop_all_sites()?;

    #[cfg(feature = "audit-log")]
    {
        let details = format!("{count} site(s) removed");
        crate::audit::log_audit(cli, "drop", None, Some(&details));
    }

    output::success(&format!("Dropped {count} site(s)"));

    Ok(())
}
