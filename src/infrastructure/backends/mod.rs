pub mod gemini;

use std::sync::Arc;

use crate::domain::models::ImageGeneratorBox;
use crate::domain::models::PromptGeneratorBox;

pub struct BackendManager {}

impl BackendManager {
    /// Both clients talk to the same service, so they share one instance.
    pub fn get() -> (PromptGeneratorBox, ImageGeneratorBox) {
        let gemini = Arc::new(gemini::Gemini::default());
        let prompts: PromptGeneratorBox = gemini.clone();
        let images: ImageGeneratorBox = gemini;
        return (prompts, images);
    }
}
