use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::PromptKeySelector;
use super::KEY_REQUEST_NOTICE;
use crate::domain::models::Event;
use crate::domain::models::KeySelector;
use crate::domain::models::KeySelectorName;
use crate::infrastructure::keys::KeySelectorManager;

#[tokio::test]
async fn it_asks_for_a_key() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let selector = PromptKeySelector::new(tx);

    selector.request_key();

    match rx.recv().await {
        Some(Event::Notice(text)) => assert_eq!(text, KEY_REQUEST_NOTICE),
        _ => bail!("Wrong event from recv"),
    }

    return Ok(());
}

#[test]
fn it_builds_selectors_by_name() {
    let (tx, _rx) = mpsc::unbounded_channel::<Event>();

    let prompt = KeySelectorManager::get(KeySelectorName::Prompt, tx.clone());
    assert_eq!(prompt.name(), KeySelectorName::Prompt);

    let none = KeySelectorManager::get(KeySelectorName::None, tx);
    assert_eq!(none.name(), KeySelectorName::None);
    assert!(none.has_key());
}
