//! Clipboard boundary

use std::sync::Mutex;

use anyhow::Context;

/// Receives text (the saved image path) for pasting elsewhere
pub trait Clipboard {
    fn set_text(&self, text: &str) -> anyhow::Result<()>;
}

/// Desktop clipboard through `arboard`.
///
/// On X11 and Wayland the copied text is served for as long as this value
/// lives, so keep it around until the process is done.
pub struct SystemClipboard {
    inner: Mutex<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> anyhow::Result<Self> {
        let inner = arboard::Clipboard::new().context("opening the system clipboard")?;
        Ok(Self {
            inner: Mutex::new(inner),
        })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("clipboard lock poisoned"))?;
        clipboard
            .set_text(text.to_string())
            .context("writing to the system clipboard")?;
        log::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}
