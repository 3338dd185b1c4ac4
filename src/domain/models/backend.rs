#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::AspectRatio;
use super::GeneratedImage;
use super::SceneCount;
use super::StoryResponse;

/// Appended to every image prompt so renders share one photographic look no
/// matter how the prompt was worded.
pub const IMAGE_STYLE_SUFFIX: &str = ", cinematic high-end photography, 8k resolution, ultra detailed";

/// Instructions and content for one plan generation request.
pub struct PlanPrompt {
    pub story: String,
    pub scene_count: SceneCount,
    pub existing_count: usize,
}

impl PlanPrompt {
    pub fn new(story: &str, scene_count: SceneCount, existing_count: usize) -> PlanPrompt {
        return PlanPrompt {
            story: story.to_string(),
            scene_count,
            existing_count,
        };
    }

    pub fn is_continuation(&self) -> bool {
        return self.existing_count > 0;
    }

    pub fn system_instruction(&self) -> String {
        let count = self.scene_count;
        let mut continuation = "".to_string();
        if self.is_continuation() {
            continuation = format!(
                "\nNote: You are adding {count} MORE scenes to an existing set of {} scenes. Continue from where the previous scenes likely left off or deepen the existing visual narrative.",
                self.existing_count
            );
        }

        return format!(
            r#"You are a professional AI prompt generator for a story-to-media storyboard tool.

RESPONSIBILITIES:
1. Understand the story in its original language.
2. Do NOT rewrite, summarize, or modify the story.
3. Analyze story structure and flow.
4. Generate exactly {count} image scenes based on the story.{continuation}
5. Generate all IMAGE PROMPTS and the THUMBNAIL PROMPT in ENGLISH ONLY.

STYLE REQUIREMENTS:
- Cinematic composition, ultra-realistic, 8K, high detail, professional photography.
- Focus on lighting, shadows, camera angle, and depth of field.
- Evoke strong mood and emotion accurate to the story.

OUTPUT FORMAT:
You must return a JSON object with exactly two keys:
"scenes": an array of strings, each being a cinematic image prompt.
"thumbnail": a single string, a powerful summary cinematic prompt."#
        );
    }

    pub fn contents(&self) -> String {
        return format!(
            "Story: {}\nGenerate {} scenes.",
            self.story, self.scene_count
        );
    }
}

pub fn styled_image_prompt(prompt: &str) -> String {
    return format!("{}{IMAGE_STYLE_SUFFIX}", prompt.trim_end());
}

#[async_trait]
pub trait PromptGenerator {
    /// Turns a story into `scene_count` scene prompts and one thumbnail
    /// prompt. A non-zero `existing_count` asks the model to continue an
    /// existing board rather than start over.
    ///
    /// Implementations make exactly one request and never retry.
    async fn generate_prompts(
        &self,
        story: &str,
        scene_count: SceneCount,
        existing_count: usize,
    ) -> Result<StoryResponse>;
}

#[async_trait]
pub trait ImageGenerator {
    /// Renders a single image for the prompt. Fails with
    /// `GenerationError::NoImageReturned` when no candidate carries inline
    /// image data.
    async fn generate_image(&self, prompt: &str, aspect_ratio: AspectRatio)
        -> Result<GeneratedImage>;
}

pub type PromptGeneratorBox = Arc<dyn PromptGenerator + Send + Sync>;
pub type ImageGeneratorBox = Arc<dyn ImageGenerator + Send + Sync>;
