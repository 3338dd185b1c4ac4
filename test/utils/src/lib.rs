use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub fn story_fixture() -> &'static str {
    return "A lone wanderer finds a garden hidden beneath the neon lights of a cyberpunk metropolis.";
}

/// Raw bytes standing in for a rendered image. Only the 8 byte PNG signature,
/// which is enough for anything that sniffs or writes the payload.
pub fn png_fixture() -> Vec<u8> {
    return vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];
}

pub fn png_base64_fixture() -> String {
    return STANDARD.encode(png_fixture());
}

/// Builds a `generateContent` response body with a single text part, the way
/// the service answers structured output requests.
pub fn text_response_fixture(text: &str) -> String {
    return serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP"
        }]
    })
    .to_string();
}

/// Storyboard payload as the text model would serialize it.
pub fn storyboard_fixture(scenes: &[&str], thumbnail: &str) -> String {
    return serde_json::json!({
        "scenes": scenes,
        "thumbnail": thumbnail,
    })
    .to_string();
}

/// Builds a `generateContent` response body where the image sits in the
/// second part of the first candidate, after a short caption.
pub fn image_response_fixture(mime_type: &str, data: &str) -> String {
    return serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    { "text": "Here is your image." },
                    { "inlineData": { "mimeType": mime_type, "data": data } }
                ]
            }
        }]
    })
    .to_string();
}

pub fn error_response_fixture(code: u16, status: &str, message: &str) -> String {
    return serde_json::json!({
        "error": {
            "code": code,
            "message": message,
            "status": status,
        }
    })
    .to_string();
}
