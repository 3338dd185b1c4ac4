#[cfg(test)]
#[path = "failure_test.rs"]
mod tests;

/// Errors raised by the generation clients. They travel inside
/// `anyhow::Error` and are recovered with `Failure::classify`.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("No response from the text generation service")]
    EmptyResponse,

    #[error("Failed to parse the storyboard response: {0}")]
    Parse(String),

    #[error("Expected {expected} scenes but the service returned {actual}")]
    SceneCountMismatch { expected: usize, actual: usize },

    #[error("No image was returned by the image generation service")]
    NoImageReturned,

    #[error("Request failed with status {status}: {message}")]
    Service { status: u16, message: String },
}

const AUTH_MARKERS: [&str; 6] = [
    "entity was not found",
    "API key not valid",
    "API_KEY_INVALID",
    "PERMISSION_DENIED",
    "UNAUTHENTICATED",
    "RESOURCE_EXHAUSTED",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    Validation,
    EmptyResponse,
    Parse,
    AuthOrQuota,
    NoImageReturned,
    Unknown,
}

impl Failure {
    pub fn classify(err: &anyhow::Error) -> Failure {
        let text = format!("{err:#}");
        if AUTH_MARKERS.iter().any(|marker| return text.contains(marker)) {
            return Failure::AuthOrQuota;
        }

        if let Some(generation_err) = err.downcast_ref::<GenerationError>() {
            match generation_err {
                GenerationError::EmptyResponse => return Failure::EmptyResponse,
                GenerationError::Parse(_) => return Failure::Parse,
                GenerationError::SceneCountMismatch { .. } => return Failure::Parse,
                GenerationError::NoImageReturned => return Failure::NoImageReturned,
                GenerationError::Service { status, .. } => {
                    if [401, 403, 429].contains(status) {
                        return Failure::AuthOrQuota;
                    }
                    return Failure::Unknown;
                }
            }
        }

        if err.downcast_ref::<serde_json::Error>().is_some() {
            return Failure::Parse;
        }

        return Failure::Unknown;
    }

    /// Message shown in the session error banner.
    pub fn message(&self) -> &'static str {
        match self {
            Failure::Validation => return "Please enter a story first.",
            Failure::AuthOrQuota => {
                return "API key verification failed. Please select a valid key and try again."
            }
            Failure::NoImageReturned => return "Failed to generate image. Please try again.",
            _ => return "An error occurred while generating prompts. Please try again.",
        }
    }

    /// Whether the failure should force the key selection flow again.
    pub fn invalidates_key(&self) -> bool {
        return *self == Failure::AuthOrQuota;
    }
}
