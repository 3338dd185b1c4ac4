use anyhow::bail;
use anyhow::Result;
use test_utils::png_base64_fixture;
use test_utils::png_fixture;
use tokio::sync::mpsc;

use super::download;
use super::help_text;
use super::save_image;
use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::AspectRatio;
use crate::domain::models::Event;
use crate::domain::models::GeneratedImage;
use crate::domain::models::ImageDataUri;
use crate::domain::models::Scene;

fn image() -> GeneratedImage {
    return GeneratedImage {
        url: ImageDataUri::new("image/png", &png_base64_fixture()),
        aspect_ratio: AspectRatio::Widescreen,
    };
}

fn temp_dir() -> std::path::PathBuf {
    return std::env::temp_dir().join(format!("storyreel-test-{}", uuid::Uuid::new_v4()));
}

#[tokio::test]
async fn it_saves_images() -> Result<()> {
    let dir = temp_dir();
    let image = image();
    let file_name = Scene::new(2, "prompt").file_name(&image);

    let file_path = save_image(&dir, &image, &file_name).await?;

    assert_eq!(file_path, dir.join("scene-2-16x9.png"));
    assert_eq!(tokio::fs::read(&file_path).await?, png_fixture());

    tokio::fs::remove_dir_all(&dir).await?;
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_save_undecodable_images() {
    let dir = temp_dir();
    let image = GeneratedImage {
        url: ImageDataUri::new("image/png", "%%%"),
        aspect_ratio: AspectRatio::Square,
    };

    assert!(save_image(&dir, &image, "broken.png").await.is_err());
    assert!(!dir.exists());
}

#[tokio::test]
async fn it_reports_saved_images() -> Result<()> {
    let dir = temp_dir();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    download(&dir, image(), "thumbnail-16x9.png".to_string(), &tx).await?;

    match rx.recv().await {
        Some(Event::Notice(text)) => {
            assert!(text.starts_with("Saved "));
            assert!(text.ends_with("thumbnail-16x9.png"));
        }
        _ => bail!("Wrong event from recv"),
    }
    assert!(dir.join("thumbnail-16x9.png").exists());

    tokio::fs::remove_dir_all(&dir).await?;
    return Ok(());
}

#[tokio::test]
async fn it_warns_when_saving_fails() -> Result<()> {
    let dir = temp_dir();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let broken = GeneratedImage {
        url: ImageDataUri::new("image/png", "%%%"),
        aspect_ratio: AspectRatio::Square,
    };

    download(&dir, broken, "scene-1-1x1.png".to_string(), &tx).await?;

    match rx.recv().await {
        Some(Event::Warning(text)) => assert!(text.starts_with("Failed to save scene-1-1x1.png")),
        _ => bail!("Wrong event from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_warns_when_the_clipboard_is_unavailable() -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    action_tx.send(Action::CopyText(
        "scene 1 prompt".to_string(),
        "A garden".to_string(),
    ))?;
    drop(action_tx);

    ActionsService::start(event_tx, &mut action_rx).await?;

    match event_rx.recv().await {
        Some(Event::Warning(text)) => {
            insta::assert_snapshot!(text, @"Failed to copy scene 1 prompt: Clipboard service is not initialized.");
        }
        _ => bail!("Wrong event from recv"),
    }

    return Ok(());
}

#[test]
fn it_lists_every_command_in_help() {
    let text = help_text();
    for command in [
        "/story", "/scenes", "/ratio", "/generate", "/more", "/image", "/thumbnail", "/list",
        "/copy", "/save", "/key", "/quit", "/help",
    ] {
        assert!(text.contains(command), "missing {command}");
    }
}
