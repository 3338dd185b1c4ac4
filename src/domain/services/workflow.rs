#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::Store;
use crate::domain::models::is_blank;
use crate::domain::models::AspectRatio;
use crate::domain::models::Event;
use crate::domain::models::Failure;
use crate::domain::models::ImageGeneratorBox;
use crate::domain::models::KeySelectorBox;
use crate::domain::models::PlanMode;
use crate::domain::models::PromptGeneratorBox;
use crate::domain::models::Scene;
use crate::domain::models::SceneCount;
use crate::domain::models::SceneId;
use crate::domain::models::StoreEvent;
use crate::domain::models::StoryResponse;

fn send(tx: &mpsc::UnboundedSender<Event>, event: StoreEvent) {
    if let Err(err) = tx.send(Event::Store(event)) {
        tracing::error!(error = ?err, "Session loop is gone, dropping completion");
    }
}

fn plan_outcome(
    res: Result<StoryResponse>,
    mode: PlanMode,
    scene_count: SceneCount,
    existing_count: usize,
) -> StoreEvent {
    match res.and_then(|response| return response.reconcile(scene_count)) {
        Ok(response) => {
            tracing::info!(
                scenes = response.scenes.len(),
                existing = existing_count,
                "Plan generated"
            );
            return StoreEvent::PlanSucceeded {
                mode,
                scenes: Scene::batch(&response.scenes, existing_count),
                thumbnail: response.thumbnail,
            };
        }
        Err(err) => {
            let failure = Failure::classify(&err);
            tracing::error!(error = ?err, failure = ?failure, "Plan generation failed");
            return StoreEvent::PlanFailed {
                message: failure.message().to_string(),
                key_invalid: failure.invalidates_key(),
            };
        }
    }
}

/// Runs user intents against the generation clients and feeds the results
/// back to the session loop as store events. Requests run on spawned tasks;
/// their completions are applied by whoever owns the `Store`.
pub struct Workflow {
    prompts: PromptGeneratorBox,
    images: ImageGeneratorBox,
    keys: KeySelectorBox,
    tx: mpsc::UnboundedSender<Event>,
}

impl Workflow {
    pub fn new(
        prompts: PromptGeneratorBox,
        images: ImageGeneratorBox,
        keys: KeySelectorBox,
        tx: mpsc::UnboundedSender<Event>,
    ) -> Workflow {
        return Workflow {
            prompts,
            images,
            keys,
            tx,
        };
    }

    pub fn set_story(&self, store: &mut Store, story: &str) {
        store.dispatch(StoreEvent::StoryChanged(story.to_string()));
    }

    pub fn append_story(&self, store: &mut Store, line: &str) {
        let mut story = store.snapshot().story.to_string();
        if !story.is_empty() {
            story += "\n";
        }
        story += line;

        store.dispatch(StoreEvent::StoryChanged(story));
    }

    pub fn set_scene_count(&self, store: &mut Store, scene_count: SceneCount) {
        store.dispatch(StoreEvent::SceneCountChanged(scene_count));
    }

    /// Only affects requests made afterwards.
    pub fn set_aspect_ratio(&self, store: &mut Store, aspect_ratio: AspectRatio) {
        store.dispatch(StoreEvent::AspectRatioChanged(aspect_ratio));
    }

    pub fn select_key(&self, store: &mut Store) {
        store.dispatch(StoreEvent::KeySelected());
    }

    fn ensure_key(&self, store: &mut Store) {
        if store.snapshot().key_valid && self.keys.has_key() {
            return;
        }

        tracing::info!(selector = %self.keys.name(), "Requesting key selection");
        self.keys.request_key();
        store.dispatch(StoreEvent::KeySelected());
    }

    /// Requests a storyboard plan. `PlanMode::Continue` keeps the current
    /// scenes and appends the new ones after them.
    pub fn generate_plan(&self, store: &mut Store, mode: PlanMode) -> Option<JoinHandle<()>> {
        if store.snapshot().is_generating_prompts {
            tracing::debug!("Plan generation already in flight, ignoring");
            return None;
        }

        if is_blank(&store.snapshot().story) {
            store.dispatch(StoreEvent::PlanRejected(
                Failure::Validation.message().to_string(),
            ));
            return None;
        }

        self.ensure_key(store);

        let state = store.snapshot();
        let story = state.story.to_string();
        let scene_count = state.scene_count;
        let existing_count = match mode {
            PlanMode::Fresh => 0,
            PlanMode::Continue => state.scenes.len(),
        };

        store.dispatch(StoreEvent::PlanStarted());
        tracing::info!(
            scene_count = scene_count.get(),
            existing = existing_count,
            "Generating plan"
        );

        let prompts = self.prompts.clone();
        let tx = self.tx.clone();
        return Some(tokio::spawn(async move {
            let res = prompts
                .generate_prompts(&story, scene_count, existing_count)
                .await;
            send(
                &tx,
                plan_outcome(res, mode, scene_count, existing_count),
            );
        }));
    }

    /// Renders the image for one scene. Unknown scenes, scenes with an image
    /// and scenes already in flight are left alone.
    pub fn generate_scene_image(&self, store: &mut Store, id: &SceneId) -> Option<JoinHandle<()>> {
        match store.snapshot().scene(id) {
            Some(scene) if scene.image.accepts_request() => {}
            _ => {
                tracing::debug!(scene = %id, "Scene image not requestable, ignoring");
                return None;
            }
        }

        self.ensure_key(store);

        let state = store.snapshot();
        let aspect_ratio = state.aspect_ratio;
        let prompt = match state.scene(id) {
            Some(scene) => scene.prompt.to_string(),
            None => return None,
        };

        store.dispatch(StoreEvent::SceneImageStarted(id.clone()));

        let images = self.images.clone();
        let tx = self.tx.clone();
        let id = id.clone();
        return Some(tokio::spawn(async move {
            match images.generate_image(&prompt, aspect_ratio).await {
                Ok(image) => {
                    tracing::info!(scene = %id, "Scene image generated");
                    send(&tx, StoreEvent::SceneImageSucceeded(id, image));
                }
                Err(err) => {
                    let failure = Failure::classify(&err);
                    tracing::warn!(scene = %id, error = ?err, failure = ?failure, "Scene image failed");
                    send(
                        &tx,
                        StoreEvent::SceneImageFailed {
                            id,
                            key_invalid: failure.invalidates_key(),
                        },
                    );
                }
            }
        }));
    }

    /// Fans out one independent request per scene that still needs an image.
    pub fn generate_pending_images(&self, store: &mut Store) -> Vec<JoinHandle<()>> {
        let ids = store.snapshot().pending_scene_ids();
        return ids
            .iter()
            .filter_map(|id| return self.generate_scene_image(store, id))
            .collect();
    }

    pub fn generate_thumbnail(&self, store: &mut Store) -> Option<JoinHandle<()>> {
        let thumbnail = &store.snapshot().thumbnail;
        if is_blank(&thumbnail.prompt) || !thumbnail.image.accepts_request() {
            tracing::debug!("Thumbnail not requestable, ignoring");
            return None;
        }

        self.ensure_key(store);

        let state = store.snapshot();
        let aspect_ratio = state.aspect_ratio;
        let id = state.thumbnail.id.clone();
        let prompt = state.thumbnail.prompt.to_string();

        store.dispatch(StoreEvent::ThumbnailStarted(id.clone()));

        let images = self.images.clone();
        let tx = self.tx.clone();
        return Some(tokio::spawn(async move {
            match images.generate_image(&prompt, aspect_ratio).await {
                Ok(image) => {
                    tracing::info!(thumbnail = %id, "Thumbnail generated");
                    send(&tx, StoreEvent::ThumbnailSucceeded { id, image });
                }
                Err(err) => {
                    let failure = Failure::classify(&err);
                    tracing::warn!(thumbnail = %id, error = ?err, failure = ?failure, "Thumbnail failed");
                    send(
                        &tx,
                        StoreEvent::ThumbnailFailed {
                            id,
                            key_invalid: failure.invalidates_key(),
                        },
                    );
                }
            }
        }));
    }
}
