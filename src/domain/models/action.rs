use super::GeneratedImage;

/// Side effects the UI hands to the background actions service.
#[derive(Debug)]
pub enum Action {
    /// Label used in the confirmation notice, then the text to copy.
    CopyText(String, String),
    /// Image to write, then the file name inside the output directory.
    SaveImage(GeneratedImage, String),
}
