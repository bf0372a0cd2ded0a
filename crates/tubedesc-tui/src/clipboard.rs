//! System clipboard access.

use anyhow::Context;
use tracing::debug;

pub fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to write to the clipboard")?;
    debug!(chars = text.chars().count(), "Copied to clipboard");
    Ok(())
}

pub fn read_clipboard() -> anyhow::Result<String> {
    let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
    clipboard
        .get_text()
        .context("Failed to read from the clipboard")
}
