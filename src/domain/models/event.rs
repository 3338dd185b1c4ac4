use super::AspectRatio;
use super::GeneratedImage;
use super::PlanMode;
use super::Scene;
use super::SceneCount;
use super::SceneId;
use super::ThumbnailId;

/// State transitions applied by the session store. Every event is applied
/// whole, one at a time, from the UI loop.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
pub enum StoreEvent {
    StoryChanged(String),
    SceneCountChanged(SceneCount),
    AspectRatioChanged(AspectRatio),
    KeySelected(),
    PlanRejected(String),
    PlanStarted(),
    PlanSucceeded {
        mode: PlanMode,
        scenes: Vec<Scene>,
        thumbnail: String,
    },
    PlanFailed {
        message: String,
        key_invalid: bool,
    },
    SceneImageStarted(SceneId),
    SceneImageSucceeded(SceneId, GeneratedImage),
    SceneImageFailed {
        id: SceneId,
        key_invalid: bool,
    },
    ThumbnailStarted(ThumbnailId),
    ThumbnailSucceeded {
        id: ThumbnailId,
        image: GeneratedImage,
    },
    ThumbnailFailed {
        id: ThumbnailId,
        key_invalid: bool,
    },
}

#[derive(Debug)]
pub enum Event {
    Store(StoreEvent),
    Notice(String),
    Warning(String),
}
