use super::Storyboard;
use crate::domain::models::AspectRatio;
use crate::domain::models::GeneratedImage;
use crate::domain::models::ImageDataUri;
use crate::domain::models::ImageSlot;
use crate::domain::models::Scene;
use crate::domain::models::SessionState;
use crate::domain::models::Thumbnail;

fn state() -> SessionState {
    let mut state = SessionState::default();
    state.scenes = Scene::batch(
        &[
            "A neon city at night".to_string(),
            "A hidden garden".to_string(),
        ],
        0,
    );
    state.thumbnail = Thumbnail::new("A wanderer in a glowing garden");

    return state;
}

#[test]
fn it_formats_all_prompts() {
    assert_eq!(
        Storyboard::all_prompts(&state()),
        "🖼️ IMAGE PROMPTS:\nScene 1:\n\"A neon city at night\"\n\nScene 2:\n\"A hidden garden\"\n\n🎬 THUMBNAIL PROMPT:\n\"A wanderer in a glowing garden\""
    );
}

#[test]
fn it_describes_slot_states() {
    insta::assert_snapshot!(Storyboard::slot_status(&ImageSlot::Empty), @"pending visual");
    insta::assert_snapshot!(Storyboard::slot_status(&ImageSlot::Generating), @"developing visual...");
    let ready = ImageSlot::Ready(GeneratedImage {
        url: ImageDataUri::new("image/png", "abc"),
        aspect_ratio: AspectRatio::Portrait,
    });
    insta::assert_snapshot!(Storyboard::slot_status(&ready), @"visual ready (3:4)");
}

#[test]
fn it_renders_an_empty_session() {
    let mut state = SessionState::default();
    state.error = Some("Please enter a story first.".to_string());

    assert_eq!(
        Storyboard::render(&state),
        "Scenes: 3 | Aspect ratio: 16:9\nError: Please enter a story first.\nNo storyboard yet. Write your story and run /generate."
    );
}

#[test]
fn it_renders_the_board() {
    let mut state = state();
    state.scenes[1].image = ImageSlot::Generating;

    assert_eq!(
        Storyboard::render(&state),
        [
            "Scenes: 3 | Aspect ratio: 16:9",
            "Story poster [pending visual]",
            "  \"A wanderer in a glowing garden\"",
            "Scene 1 [pending visual]",
            "  \"A neon city at night\"",
            "Scene 2 [developing visual...]",
            "  \"A hidden garden\"",
        ]
        .join("\n")
    );
}
