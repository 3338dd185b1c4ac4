use super::SessionState;
use crate::domain::models::AspectRatio;
use crate::domain::models::GeneratedImage;
use crate::domain::models::ImageDataUri;
use crate::domain::models::ImageSlot;
use crate::domain::models::Scene;

fn state_with_scenes() -> SessionState {
    let mut state = SessionState::default();
    state.scenes = Scene::batch(
        &["one".to_string(), "two".to_string(), "three".to_string()],
        0,
    );
    state.scenes[1].image = ImageSlot::Generating;
    state.scenes[2].image = ImageSlot::Ready(GeneratedImage {
        url: ImageDataUri::new("image/png", "abc"),
        aspect_ratio: AspectRatio::Square,
    });

    return state;
}

#[test]
fn it_starts_empty() {
    let state = SessionState::default();
    assert_eq!(state.story, "");
    assert_eq!(state.scene_count.get(), 3);
    assert_eq!(state.aspect_ratio, AspectRatio::Widescreen);
    assert!(state.scenes.is_empty());
    assert_eq!(state.thumbnail.prompt, "");
    assert!(!state.is_generating_prompts);
    assert!(!state.is_generating_thumbnail());
    assert!(state.error.is_none());
    assert!(state.key_valid);
    assert!(!state.has_plan());
}

#[test]
fn it_finds_scenes_by_id_and_index() {
    let state = state_with_scenes();
    let second = &state.scenes[1];

    assert_eq!(state.scene(&second.id), Some(second));
    assert_eq!(state.scene_by_index(2), Some(second));
    assert!(state.scene_by_index(4).is_none());
}

#[test]
fn it_lists_pending_scenes() {
    let state = state_with_scenes();
    assert_eq!(state.pending_scene_ids(), vec![state.scenes[0].id.clone()]);
}
