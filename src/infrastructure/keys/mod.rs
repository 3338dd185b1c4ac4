pub mod none;
pub mod prompt;

use tokio::sync::mpsc;

use crate::domain::models::Event;
use crate::domain::models::KeySelectorBox;
use crate::domain::models::KeySelectorName;

pub struct KeySelectorManager {}

impl KeySelectorManager {
    pub fn get(name: KeySelectorName, tx: mpsc::UnboundedSender<Event>) -> KeySelectorBox {
        match name {
            KeySelectorName::Prompt => return Box::new(prompt::PromptKeySelector::new(tx)),
            KeySelectorName::None => return Box::<none::NoopKeySelector>::default(),
        }
    }
}
