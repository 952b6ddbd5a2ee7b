//! `pwm list` — display all site records in a table.

use crate::cli::output;
use crate::cli::{prompt_passphrase, vault_dir, Cli};
use crate::errors::Result;
use crate::vault::Vault;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let passphrase = prompt_passphrase()?;
    let vault = Vault::open(&vault_dir(cli)?)?;
    let session = vault.unlock(&cli.user, passphrase.as_bytes())?;

    let sites = session.list_sites();

    output::info(&format!("{} — {} site(s)", cli.user, sites.len()));
    output::print_sites_table(&sites);

    Ok(())
}
