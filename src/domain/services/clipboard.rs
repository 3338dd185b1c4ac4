#[cfg(test)]
#[path = "clipboard_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;
use once_cell::sync::OnceCell;
use tokio::sync::mpsc;

use crate::domain::models::Event;

/// Label used in the outcome notice, then the text to copy.
type ClipboardRequest = (String, String);

static SENDER: OnceCell<mpsc::UnboundedSender<ClipboardRequest>> = OnceCell::new();

fn outcome(label: &str, res: Result<()>) -> Event {
    match res {
        Ok(()) => return Event::Notice(format!("Copied {label} to clipboard.")),
        Err(err) => {
            tracing::error!(error = ?err, "Failed to write to clipboard");
            return Event::Warning(format!("Failed to copy {label}: {err}"));
        }
    }
}

/// Owns the system clipboard on a dedicated task, since `arboard` handles
/// must stay alive for the copied text to remain available on some
/// platforms.
pub struct ClipboardService {}

impl ClipboardService {
    pub async fn start(tx: mpsc::UnboundedSender<Event>) -> Result<()> {
        let (req_tx, mut req_rx) = mpsc::unbounded_channel::<ClipboardRequest>();
        if SENDER.set(req_tx).is_err() {
            return Err(anyhow!("Clipboard service is already running."));
        }
        let mut clipboard = arboard::Clipboard::new()?;

        while let Some((label, text)) = req_rx.recv().await {
            let res = clipboard.set_text(text).map_err(|err| return anyhow!(err));
            tx.send(outcome(&label, res))?;
        }

        return Ok(());
    }

    pub fn healthcheck() -> Result<()> {
        if SENDER.get().is_some() {
            return Ok(());
        }

        arboard::Clipboard::new()?;
        return Ok(());
    }

    /// Queues text for the clipboard task, which reports the outcome.
    pub fn set(label: &str, text: String) -> Result<()> {
        if let Some(tx) = SENDER.get() {
            tx.send((label.to_string(), text))?;
            return Ok(());
        }

        return Err(anyhow!("Clipboard service is not initialized."));
    }
}
