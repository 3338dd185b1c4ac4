#[cfg(test)]
#[path = "storyboard_test.rs"]
mod tests;

use crate::domain::models::ImageSlot;
use crate::domain::models::Scene;
use crate::domain::models::SessionState;

pub struct Storyboard {}

impl Storyboard {
    /// Every prompt on the board in one clipboard friendly block.
    pub fn all_prompts(state: &SessionState) -> String {
        let scenes = state
            .scenes
            .iter()
            .map(|scene| return format!("Scene {}:\n\"{}\"", scene.index, scene.prompt))
            .collect::<Vec<String>>()
            .join("\n\n");

        return format!(
            "🖼️ IMAGE PROMPTS:\n{scenes}\n\n🎬 THUMBNAIL PROMPT:\n\"{}\"",
            state.thumbnail.prompt
        );
    }

    pub fn slot_status(slot: &ImageSlot) -> String {
        match slot {
            ImageSlot::Empty => return "pending visual".to_string(),
            ImageSlot::Generating => return "developing visual...".to_string(),
            ImageSlot::Ready(image) => return format!("visual ready ({})", image.aspect_ratio),
        }
    }

    pub fn scene_line(scene: &Scene) -> String {
        return format!(
            "Scene {} [{}]\n  \"{}\"",
            scene.index,
            Storyboard::slot_status(&scene.image),
            scene.prompt
        );
    }

    /// Plain text rendering of the whole session.
    pub fn render(state: &SessionState) -> String {
        let mut lines: Vec<String> = vec![format!(
            "Scenes: {} | Aspect ratio: {}",
            state.scene_count, state.aspect_ratio
        )];

        if let Some(error) = &state.error {
            lines.push(format!("Error: {error}"));
        }

        if state.is_generating_prompts {
            lines.push("Generating storyboard...".to_string());
        }

        if !state.has_plan() {
            lines.push("No storyboard yet. Write your story and run /generate.".to_string());
            return lines.join("\n");
        }

        if !state.thumbnail.prompt.is_empty() {
            lines.push(format!(
                "Story poster [{}]\n  \"{}\"",
                Storyboard::slot_status(&state.thumbnail.image),
                state.thumbnail.prompt
            ));
        }

        for scene in state.scenes.iter() {
            lines.push(Storyboard::scene_line(scene));
        }

        return lines.join("\n");
    }
}
