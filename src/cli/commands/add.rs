//! `pwm add` — add a new site record to the vault.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{prompt_passphrase, vault_dir, Cli};
use crate::errors::{PwmError, Result};
use crate::vault::Vault;

/// Execute the `add` command.
pub fn execute(cli: &Cli, name: &str, login: Option<&str>) -> Result<()> {
    // Collect the record fields before asking for the passphrase, so a
    // typo in the login doesn't cost a KDF round.
    let login = match login {
        Some(l) => l.to_string(),
        None => dialoguer::Input::<String>::new()
            .with_prompt(format!("Login for {name}"))
            .interact_text()
            .map_err(|e| PwmError::CommandFailed(format!("login prompt: {e}")))?,
    };

    let password = if !io::stdin().is_terminal() {
        // Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Interactive hidden prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Password for {name}"))
            .interact()
            .map_err(|e| PwmError::CommandFailed(format!("password prompt: {e}")))?
    };

    // Unlock and store.
    let passphrase = prompt_passphrase()?;
    let vault = Vault::open(&vault_dir(cli)?)?;
    let mut session = vault.unlock(&cli.user, passphrase.as_bytes())?;

    session.add_site(name, &login, &password)?;

    #[cfg(feature = "audit-log")]
    crate::audit::log_audit(cli, "add", Some(name), None);

    output::success(&format!(
        "Site '{}' added ({} total)",
        name,
        session.site_count()
    ));

    Ok(())
}
