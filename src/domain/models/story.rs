#[cfg(test)]
#[path = "story_test.rs"]
mod tests;

use std::fmt;

use anyhow::bail;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use super::GenerationError;

/// Number of scenes requested by a single plan generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SceneCount(usize);

impl SceneCount {
    pub const MIN: usize = 1;
    pub const MAX: usize = 10;

    pub fn new(count: usize) -> Result<SceneCount> {
        if !(SceneCount::MIN..=SceneCount::MAX).contains(&count) {
            bail!(format!(
                "Scene count must be between {} and {}, got {count}",
                SceneCount::MIN,
                SceneCount::MAX
            ));
        }

        return Ok(SceneCount(count));
    }

    pub fn parse(text: &str) -> Result<SceneCount> {
        let count = match text.trim().parse::<usize>() {
            Ok(count) => count,
            Err(_) => bail!(format!("'{text}' is not a valid scene count")),
        };

        return SceneCount::new(count);
    }

    pub fn get(&self) -> usize {
        return self.0;
    }
}

impl Default for SceneCount {
    fn default() -> SceneCount {
        return SceneCount(3);
    }
}

impl fmt::Display for SceneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanMode {
    /// Replaces the whole board.
    Fresh,
    /// Extends the board with more scenes.
    Continue,
}

/// Structured output of the text model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResponse {
    pub scenes: Vec<String>,
    pub thumbnail: String,
}

impl StoryResponse {
    /// Drops surplus scenes and rejects short answers, so a plan always holds
    /// exactly the requested number of scenes.
    pub fn reconcile(mut self, expected: SceneCount) -> Result<StoryResponse> {
        let actual = self.scenes.len();
        if actual < expected.get() {
            return Err(GenerationError::SceneCountMismatch {
                expected: expected.get(),
                actual,
            }
            .into());
        }

        if actual > expected.get() {
            tracing::warn!(
                expected = expected.get(),
                actual = actual,
                "Model returned more scenes than requested, truncating"
            );
            self.scenes.truncate(expected.get());
        }

        return Ok(self);
    }
}

pub fn is_blank(story: &str) -> bool {
    return story.trim().is_empty();
}
