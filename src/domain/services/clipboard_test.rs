use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;

use super::outcome;
use crate::domain::models::Event;

#[test]
fn it_confirms_written_text() -> Result<()> {
    match outcome("all prompts", Ok(())) {
        Event::Notice(text) => assert_eq!(text, "Copied all prompts to clipboard."),
        _ => bail!("Wrong event for a successful copy"),
    }

    return Ok(());
}

#[test]
fn it_warns_when_the_clipboard_rejects_text() -> Result<()> {
    match outcome("scene 2 prompt", Err(anyhow!("clipboard is occupied"))) {
        Event::Warning(text) => {
            insta::assert_snapshot!(text, @"Failed to copy scene 2 prompt: clipboard is occupied");
        }
        _ => bail!("Wrong event for a failed copy"),
    }

    return Ok(());
}
