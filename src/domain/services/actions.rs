#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::sync::mpsc;

use super::clipboard::ClipboardService;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::GeneratedImage;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- Any line not starting with a slash is appended to your story.
- /story (/s) [TEXT?] - Replaces the story with TEXT, or prints the current story when omitted.
- /scenes (/n) [COUNT] - Sets how many scenes the next generation produces, between 1 and 10.
- /ratio (/r) [RATIO] - Sets the aspect ratio for new visuals. One of 1:1, 16:9, 9:16, 3:4, 4:3.
- /generate (/g) - Generates a fresh storyboard, replacing every scene and the poster prompt.
- /more (/m) - Adds more scenes after the existing ones.
- /image (/i) [SCENE_NUMBER,all] - Develops the visual for a scene, or for every scene still missing one.
- /thumbnail (/t) - Develops the story poster visual.
- /list (/l) - Shows the storyboard.
- /copy (/c) [SCENE_NUMBER,thumbnail,all] - Copies prompts to your clipboard.
- /save (/w) [SCENE_NUMBER,thumbnail] - Saves a visual to the output directory.
- /key (/k) [TOKEN] - Selects the API key used for generation.
- /quit /exit (/q) - Exit Storyreel.
- /help (/h) - Provides this help menu.
        "#;

    return text.trim().to_string();
}

/// Writes a generated image into `dir`, creating the directory when needed.
pub async fn save_image(
    dir: &path::Path,
    image: &GeneratedImage,
    file_name: &str,
) -> Result<path::PathBuf> {
    let bytes = image.url.decode()?;
    if !dir.exists() {
        fs::create_dir_all(dir).await?;
    }

    let file_path = dir.join(file_name);
    fs::write(&file_path, bytes).await?;

    return Ok(file_path);
}

fn copy_text(label: &str, text: String, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    if let Err(err) = ClipboardService::set(label, text) {
        tx.send(Event::Warning(format!("Failed to copy {label}: {err}")))?;
    }

    return Ok(());
}

async fn download(
    dir: &path::Path,
    image: GeneratedImage,
    file_name: String,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match save_image(dir, &image, &file_name).await {
        Ok(file_path) => {
            tracing::info!(path = ?file_path, "Image saved");
            tx.send(Event::Notice(format!("Saved {}", file_path.display())))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, "Failed to save image");
            tx.send(Event::Warning(format!("Failed to save {file_name}: {err}")))?;
        }
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            match action {
                Action::CopyText(label, text) => {
                    copy_text(&label, text, &tx)?;
                }
                Action::SaveImage(image, file_name) => {
                    let dir = path::PathBuf::from(Config::get(ConfigKey::OutputDir));
                    download(&dir, image, file_name, &tx).await?;
                }
            }
        }

        return Ok(());
    }
}
