#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;

use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Event;
use crate::domain::models::KeySelector;
use crate::domain::models::KeySelectorName;

pub const KEY_REQUEST_NOTICE: &str =
    "An API key is required. Run /key <TOKEN> to select one, requests will use it as soon as it is set.";

/// Asks the user for a key through the session shell.
pub struct PromptKeySelector {
    tx: mpsc::UnboundedSender<Event>,
}

impl PromptKeySelector {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> PromptKeySelector {
        return PromptKeySelector { tx };
    }
}

impl KeySelector for PromptKeySelector {
    fn name(&self) -> KeySelectorName {
        return KeySelectorName::Prompt;
    }

    fn has_key(&self) -> bool {
        return !Config::get(ConfigKey::GeminiToken).trim().is_empty();
    }

    fn request_key(&self) {
        if let Err(err) = self.tx.send(Event::Notice(KEY_REQUEST_NOTICE.to_string())) {
            tracing::error!(error = ?err, "Failed to request a key");
        }
    }
}
