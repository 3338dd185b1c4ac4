#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::styled_image_prompt;
use crate::domain::models::AspectRatio;
use crate::domain::models::GeneratedImage;
use crate::domain::models::GenerationError;
use crate::domain::models::ImageDataUri;
use crate::domain::models::ImageGenerator;
use crate::domain::models::PlanPrompt;
use crate::domain::models::PromptGenerator;
use crate::domain::models::SceneCount;
use crate::domain::models::StoryResponse;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Part {
        return Part {
            text: Some(text.to_string()),
            inline_data: None,
        };
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        return self
            .candidates
            .iter()
            .filter_map(|candidate| return candidate.content.as_ref())
            .flat_map(|content| return content.parts.iter());
    }

    /// Text of the first candidate, all of its text parts joined.
    fn text(&self) -> String {
        let content = match self.candidates.first().and_then(|c| return c.content.as_ref()) {
            Some(content) => content,
            None => return "".to_string(),
        };

        return content
            .parts
            .iter()
            .filter_map(|part| return part.text.as_deref())
            .collect::<Vec<&str>>()
            .join("");
    }

    fn inline_data(&self) -> Option<&InlineData> {
        return self
            .parts()
            .filter_map(|part| return part.inline_data.as_ref())
            .find(|inline| return !inline.data.is_empty());
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(res) if !res.error.status.is_empty() => {
            return format!("{} ({})", res.error.message, res.error.status);
        }
        Ok(res) => return res.error.message,
        Err(_) => return body.trim().to_string(),
    }
}

/// Models sometimes wrap structured output in a Markdown code fence.
fn strip_json_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = match trimmed
        .strip_prefix("```json")
        .or_else(|| return trimmed.strip_prefix("```"))
    {
        Some(inner) => inner,
        None => return trimmed,
    };

    return inner.strip_suffix("```").unwrap_or(inner).trim();
}

fn storyboard_schema() -> serde_json::Value {
    return serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "scenes": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of cinematic image prompts for each scene"
            },
            "thumbnail": {
                "type": "STRING",
                "description": "A single powerful cinematic prompt for the story thumbnail"
            }
        },
        "required": ["scenes", "thumbnail"]
    });
}

/// Client for the Gemini `generateContent` REST API, serving both the text
/// and image models.
pub struct Gemini {
    url: String,
    /// Test override. Left empty in normal use, where every request reads the
    /// current `ConfigKey::GeminiToken` so a key set through `/key` applies
    /// right away.
    token: String,
    text_model: String,
    image_model: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: Config::get(ConfigKey::GeminiURL),
            token: "".to_string(),
            text_model: Config::get(ConfigKey::TextModel),
            image_model: Config::get(ConfigKey::ImageModel),
        };
    }
}

impl Gemini {
    fn token(&self) -> String {
        if !self.token.is_empty() {
            return self.token.to_string();
        }

        return Config::get(ConfigKey::GeminiToken);
    }

    async fn generate_content(
        &self,
        model: &str,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:generateContent?key={key}",
                url = self.url,
                key = self.token(),
            ))
            .json(req)
            .send()
            .await?;

        let status = res.status().as_u16();
        if !res.status().is_success() {
            let message = error_message(&res.text().await.unwrap_or_default());
            tracing::error!(
                status = status,
                model = model,
                reason = message,
                "Gemini request failed"
            );
            return Err(GenerationError::Service { status, message }.into());
        }

        return Ok(res.json::<GenerateContentResponse>().await?);
    }
}

#[async_trait]
impl PromptGenerator for Gemini {
    #[allow(clippy::implicit_return)]
    async fn generate_prompts(
        &self,
        story: &str,
        scene_count: SceneCount,
        existing_count: usize,
    ) -> Result<StoryResponse> {
        let prompt = PlanPrompt::new(story, scene_count, existing_count);
        let req = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::text(&prompt.contents())],
            }],
            system_instruction: Some(Content {
                role: "".to_string(),
                parts: vec![Part::text(&prompt.system_instruction())],
            }),
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(storyboard_schema()),
                ..Default::default()
            },
        };

        let res = self.generate_content(&self.text_model, &req).await?;
        let text = res.text();
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse.into());
        }

        let response = serde_json::from_str::<StoryResponse>(strip_json_fence(&text))
            .map_err(|err| return GenerationError::Parse(err.to_string()))?;

        return Ok(response);
    }
}

#[async_trait]
impl ImageGenerator for Gemini {
    #[allow(clippy::implicit_return)]
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<GeneratedImage> {
        let req = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::text(&styled_image_prompt(prompt))],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect_ratio.to_string(),
                }),
                ..Default::default()
            },
        };

        let res = self.generate_content(&self.image_model, &req).await?;
        let inline = match res.inline_data() {
            Some(inline) => inline,
            None => return Err(GenerationError::NoImageReturned.into()),
        };

        return Ok(GeneratedImage {
            url: ImageDataUri::new(&inline.mime_type, &inline.data),
            aspect_ratio,
        });
    }
}
