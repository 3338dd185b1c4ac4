#[cfg(test)]
#[path = "image_test.rs"]
mod tests;

use std::fmt;

use anyhow::bail;
use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::AspectRatio;

const DEFAULT_MIME_TYPE: &str = "image/png";

/// Base64 image payload that renders as a `data:` URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageDataUri {
    mime_type: String,
    data: String,
}

impl ImageDataUri {
    pub fn new(mime_type: &str, data: &str) -> ImageDataUri {
        let mut mime_type = mime_type.trim().to_string();
        if mime_type.is_empty() {
            mime_type = DEFAULT_MIME_TYPE.to_string();
        }

        return ImageDataUri {
            mime_type,
            data: data.to_string(),
        };
    }

    pub fn parse(uri: &str) -> Result<ImageDataUri> {
        let rest = match uri.strip_prefix("data:") {
            Some(rest) => rest,
            None => bail!("Image URI is missing the data: scheme"),
        };

        let (mime_type, data) = match rest.split_once(";base64,") {
            Some(parts) => parts,
            None => bail!("Image URI is not base64 encoded"),
        };

        return Ok(ImageDataUri::new(mime_type, data));
    }

    pub fn mime_type(&self) -> &str {
        return &self.mime_type;
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        return Ok(STANDARD.decode(&self.data)?);
    }

    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => return "jpg",
            "image/webp" => return "webp",
            "image/gif" => return "gif",
            _ => return "png",
        }
    }
}

impl fmt::Display for ImageDataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "data:{};base64,{}", self.mime_type, self.data);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImage {
    pub url: ImageDataUri,
    /// Ratio the image was requested with, which can differ from the current
    /// session ratio.
    pub aspect_ratio: AspectRatio,
}

/// Image state of a scene or the thumbnail. Being an enum, an image can never
/// be present and in flight at the same time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ImageSlot {
    #[default]
    Empty,
    Generating,
    Ready(GeneratedImage),
}

impl ImageSlot {
    pub fn is_generating(&self) -> bool {
        return *self == ImageSlot::Generating;
    }

    pub fn image(&self) -> Option<&GeneratedImage> {
        if let ImageSlot::Ready(image) = self {
            return Some(image);
        }

        return None;
    }

    /// True when a new generation may start for this slot.
    pub fn accepts_request(&self) -> bool {
        return *self == ImageSlot::Empty;
    }
}
