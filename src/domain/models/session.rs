#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use super::AspectRatio;
use super::Scene;
use super::SceneCount;
use super::SceneId;
use super::Thumbnail;

/// Everything the storyboard view renders from. Only the store produces new
/// snapshots of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub story: String,
    pub scene_count: SceneCount,
    pub aspect_ratio: AspectRatio,
    /// Insertion order, display order and index order are the same.
    pub scenes: Vec<Scene>,
    pub thumbnail: Thumbnail,
    pub is_generating_prompts: bool,
    pub error: Option<String>,
    pub key_valid: bool,
}

impl Default for SessionState {
    fn default() -> SessionState {
        return SessionState::new(SceneCount::default(), AspectRatio::default());
    }
}

impl SessionState {
    pub fn new(scene_count: SceneCount, aspect_ratio: AspectRatio) -> SessionState {
        return SessionState {
            story: "".to_string(),
            scene_count,
            aspect_ratio,
            scenes: vec![],
            thumbnail: Thumbnail::default(),
            is_generating_prompts: false,
            error: None,
            key_valid: true,
        };
    }

    pub fn scene(&self, id: &SceneId) -> Option<&Scene> {
        return self.scenes.iter().find(|scene| return &scene.id == id);
    }

    pub fn scene_by_index(&self, index: usize) -> Option<&Scene> {
        return self.scenes.iter().find(|scene| return scene.index == index);
    }

    /// Scenes that have no image and no request in flight.
    pub fn pending_scene_ids(&self) -> Vec<SceneId> {
        return self
            .scenes
            .iter()
            .filter(|scene| return scene.image.accepts_request())
            .map(|scene| return scene.id.clone())
            .collect();
    }

    pub fn is_generating_thumbnail(&self) -> bool {
        return self.thumbnail.is_generating();
    }

    pub fn has_plan(&self) -> bool {
        return !self.scenes.is_empty();
    }
}
