#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::mem;

use crate::domain::models::ImageSlot;
use crate::domain::models::PlanMode;
use crate::domain::models::Scene;
use crate::domain::models::SceneId;
use crate::domain::models::SessionState;
use crate::domain::models::StoreEvent;
use crate::domain::models::Thumbnail;
use crate::domain::models::ThumbnailId;

fn update_scene<F>(state: SessionState, id: &SceneId, update: F) -> SessionState
where
    F: Fn(Scene) -> Scene,
{
    let scenes = state
        .scenes
        .into_iter()
        .map(|scene| {
            if &scene.id == id {
                return update(scene);
            }
            return scene;
        })
        .collect();

    return SessionState { scenes, ..state };
}

fn update_thumbnail<F>(state: SessionState, id: &ThumbnailId, update: F) -> SessionState
where
    F: Fn(ImageSlot) -> ImageSlot,
{
    // Events for a thumbnail that has since been replaced are stale, even
    // when the new prompt reads the same.
    if &state.thumbnail.id != id {
        return state;
    }

    let thumbnail = Thumbnail {
        image: update(state.thumbnail.image),
        ..state.thumbnail
    };

    return SessionState { thumbnail, ..state };
}

/// Produces the next snapshot from the previous one. Scene updates replace
/// only the scene matching the event's id.
pub fn reduce(state: SessionState, event: StoreEvent) -> SessionState {
    match event {
        StoreEvent::StoryChanged(story) => {
            return SessionState { story, ..state };
        }
        StoreEvent::SceneCountChanged(scene_count) => {
            return SessionState {
                scene_count,
                ..state
            };
        }
        StoreEvent::AspectRatioChanged(aspect_ratio) => {
            return SessionState {
                aspect_ratio,
                ..state
            };
        }
        StoreEvent::KeySelected() => {
            return SessionState {
                key_valid: true,
                ..state
            };
        }
        StoreEvent::PlanRejected(message) => {
            return SessionState {
                error: Some(message),
                ..state
            };
        }
        StoreEvent::PlanStarted() => {
            return SessionState {
                is_generating_prompts: true,
                error: None,
                ..state
            };
        }
        StoreEvent::PlanSucceeded {
            mode,
            scenes,
            thumbnail,
        } => {
            let scenes = match mode {
                PlanMode::Fresh => scenes,
                PlanMode::Continue => state.scenes.into_iter().chain(scenes).collect(),
            };

            return SessionState {
                scenes,
                thumbnail: Thumbnail::new(&thumbnail),
                is_generating_prompts: false,
                ..state
            };
        }
        StoreEvent::PlanFailed {
            message,
            key_invalid,
        } => {
            return SessionState {
                is_generating_prompts: false,
                error: Some(message),
                key_valid: state.key_valid && !key_invalid,
                ..state
            };
        }
        StoreEvent::SceneImageStarted(id) => {
            return update_scene(state, &id, |scene| {
                if !scene.image.accepts_request() {
                    return scene;
                }
                return Scene {
                    image: ImageSlot::Generating,
                    ..scene
                };
            });
        }
        StoreEvent::SceneImageSucceeded(id, image) => {
            return update_scene(state, &id, |scene| {
                if !scene.image.is_generating() {
                    return scene;
                }
                return Scene {
                    image: ImageSlot::Ready(image.clone()),
                    ..scene
                };
            });
        }
        StoreEvent::SceneImageFailed { id, key_invalid } => {
            let key_valid = state.key_valid && !key_invalid;
            let state = update_scene(state, &id, |scene| {
                if !scene.image.is_generating() {
                    return scene;
                }
                return Scene {
                    image: ImageSlot::Empty,
                    ..scene
                };
            });

            return SessionState { key_valid, ..state };
        }
        StoreEvent::ThumbnailStarted(id) => {
            if state.thumbnail.prompt.trim().is_empty() {
                return state;
            }
            return update_thumbnail(state, &id, |slot| {
                if !slot.accepts_request() {
                    return slot;
                }
                return ImageSlot::Generating;
            });
        }
        StoreEvent::ThumbnailSucceeded { id, image } => {
            return update_thumbnail(state, &id, |slot| {
                if !slot.is_generating() {
                    return slot;
                }
                return ImageSlot::Ready(image.clone());
            });
        }
        StoreEvent::ThumbnailFailed { id, key_invalid } => {
            let key_valid = state.key_valid && !key_invalid;
            let state = update_thumbnail(state, &id, |slot| {
                if !slot.is_generating() {
                    return slot;
                }
                return ImageSlot::Empty;
            });

            return SessionState { key_valid, ..state };
        }
    }
}

/// Single source of truth for the session. Owned by the UI loop, which
/// applies one event at a time.
#[derive(Default)]
pub struct Store {
    state: SessionState,
}

impl Store {
    pub fn new(state: SessionState) -> Store {
        return Store { state };
    }

    pub fn snapshot(&self) -> &SessionState {
        return &self.state;
    }

    pub fn dispatch(&mut self, event: StoreEvent) {
        let name: &'static str = (&event).into();
        tracing::debug!(event = name, "store dispatch");
        let previous = mem::take(&mut self.state);
        self.state = reduce(previous, event);
    }
}
