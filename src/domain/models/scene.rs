#[cfg(test)]
#[path = "scene_test.rs"]
mod tests;

use std::fmt;

use uuid::Uuid;

use super::GeneratedImage;
use super::ImageSlot;

/// Opaque scene identity, minted client side and never reused.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SceneId(String);

impl SceneId {
    pub fn new() -> SceneId {
        return SceneId(Uuid::new_v4().simple().to_string());
    }

    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    pub id: SceneId,
    /// 1-based display position.
    pub index: usize,
    pub prompt: String,
    pub image: ImageSlot,
}

impl Scene {
    pub fn new(index: usize, prompt: &str) -> Scene {
        return Scene {
            id: SceneId::new(),
            index,
            prompt: prompt.to_string(),
            image: ImageSlot::Empty,
        };
    }

    /// Builds scenes for a batch of prompts, numbering them after the
    /// `existing_count` scenes already on the board.
    pub fn batch(prompts: &[String], existing_count: usize) -> Vec<Scene> {
        return prompts
            .iter()
            .enumerate()
            .map(|(idx, prompt)| return Scene::new(existing_count + idx + 1, prompt))
            .collect();
    }

    pub fn image_url(&self) -> Option<String> {
        return self.image.image().map(|image| return image.url.to_string());
    }

    pub fn is_generating_image(&self) -> bool {
        return self.image.is_generating();
    }

    pub fn file_name(&self, image: &GeneratedImage) -> String {
        return format!(
            "scene-{}-{}.{}",
            self.index,
            image.aspect_ratio.slug(),
            image.url.extension()
        );
    }
}

/// Identity of one thumbnail prompt. Every plan mints a new one, even when
/// the prompt text repeats, so completions can be matched to their request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ThumbnailId(String);

impl ThumbnailId {
    pub fn new() -> ThumbnailId {
        return ThumbnailId(Uuid::new_v4().simple().to_string());
    }
}

impl fmt::Display for ThumbnailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

/// The single hero prompt summarising the whole story, kept apart from the
/// scene list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Thumbnail {
    pub id: ThumbnailId,
    pub prompt: String,
    pub image: ImageSlot,
}

impl Thumbnail {
    pub fn new(prompt: &str) -> Thumbnail {
        return Thumbnail {
            id: ThumbnailId::new(),
            prompt: prompt.to_string(),
            image: ImageSlot::Empty,
        };
    }

    pub fn is_generating(&self) -> bool {
        return self.image.is_generating();
    }

    pub fn file_name(image: &GeneratedImage) -> String {
        return format!(
            "thumbnail-{}.{}",
            image.aspect_ratio.slug(),
            image.url.extension()
        );
    }
}
