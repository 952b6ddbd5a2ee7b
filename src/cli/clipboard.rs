//! Clipboard sink for `get`.
//!
//! Copying keeps the secret off the terminal and out of scrollback;
//! `--show` is the explicit opt-in to print instead.

use arboard::Clipboard;

use crate::errors::{PwmError, Result};

/// Copy `text` to the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard =
        Clipboard::new().map_err(|e| PwmError::ClipboardError(format!("clipboard open: {e}")))?;

    clipboard
        .set_text(text.to_string())
        .map_err(|e| PwmError::ClipboardError(format!("clipboard write: {e}")))
}
