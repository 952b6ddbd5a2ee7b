//! `pwm get` — retrieve a site's password or login.
//!
//! By default the decrypted password lands on the clipboard and never
//! touches the terminal.  `--login` copies the login instead, and
//! `--show` prints the requested field to stdout.

use crate::cli::{clipboard, output};
use crate::cli::{prompt_passphrase, vault_dir, Cli};
use crate::errors::Result;
use crate::vault::Vault;

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str, login: bool, show: bool) -> Result<()> {
    let passphrase = prompt_passphrase()?;
    let vault = Vault::open(&vault_dir(cli)?)?;
    let session = vault.unlock(&cli.user, passphrase.as_bytes())?;

    let (field, value) = if login {
        ("Login", session.login(name)?)
    } else {
        ("Password", session.password(name)?)
    };

    if show {
        println!("{value}");
    } else {
        clipboard::copy(&value)?;
        output::success(&format!("{field} for '{name}' copied to clipboard."));
    }

    Ok(())
}
