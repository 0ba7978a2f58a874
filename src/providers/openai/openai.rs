use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageOutputFormat};
use log::info;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use crate::config::VisionConfig;
use crate::error::AnalysisError;
use crate::providers::traits::VisionProvider;

const ANALYSIS_PROMPT: &str = "Analyze this image of food and provide detailed nutritional information. Return the response in this format:\n\nFood Name\nCalories: X\nProtein: Xg\nCarbs: Xg\nFat: Xg\nIngredients: ingredient1, ingredient2, ...";

const JPEG_QUALITY: u8 = 80;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Vision client for the OpenAI chat-completions endpoint. Sends the photo
/// as a base64 JPEG data URI inside a single user message.
#[derive(Clone)]
pub struct OpenAiVisionProvider {
    config: VisionConfig,
    client: Client,
}

impl OpenAiVisionProvider {
    pub fn new(config: VisionConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn build_request(&self, image_data: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: ANALYSIS_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:image/jpeg;base64,{}", image_data),
                        },
                    },
                ],
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl VisionProvider for OpenAiVisionProvider {
    async fn analyze_food(&self, image: &DynamicImage) -> Result<String, AnalysisError> {
        let image_data = encode_jpeg_base64(image)?;
        let request = self.build_request(&image_data);

        info!("Sending analysis request to {}", self.config.api_url);
        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::Unexpected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(parsed) => AnalysisError::Api(format!(
                    "API Error ({}): {}",
                    status.as_u16(),
                    parsed.error.message
                )),
                Err(_) => AnalysisError::Api(format!("API Error: Status code {}", status.as_u16())),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Unexpected(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AnalysisError::InvalidResponse)
    }

    fn clone_box(&self) -> Box<dyn VisionProvider + Send + Sync> {
        Box::new(self.clone())
    }
}

fn encode_jpeg_base64(image: &DynamicImage) -> Result<String, AnalysisError> {
    // JPEG has no alpha channel
    let rgb = image.to_rgb8();
    let mut buffer = Vec::new();
    rgb.write_to(
        &mut Cursor::new(&mut buffer),
        ImageOutputFormat::Jpeg(JPEG_QUALITY),
    )
    .map_err(|_| AnalysisError::ImageConversionFailed)?;
    Ok(STANDARD.encode(&buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn provider() -> OpenAiVisionProvider {
        OpenAiVisionProvider::new(VisionConfig {
            api_key: "test-key".to_string(),
            api_url: "https://example.invalid/v1/chat/completions".to_string(),
            model: "gpt-4-vision-preview".to_string(),
            max_tokens: 1000,
            temperature: 0.2,
        })
    }

    #[test]
    fn request_body_has_the_expected_shape() {
        let request = provider().build_request("QUJD");
        let body: Value = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], "gpt-4-vision-preview");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"][0]["type"], "text");
        assert_eq!(body["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            body["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,QUJD"
        );
    }

    #[test]
    fn encodes_an_image_as_base64_jpeg() {
        let image = DynamicImage::new_rgb8(2, 2);
        let encoded = encode_jpeg_base64(&image).unwrap();
        assert!(!encoded.is_empty());
        assert!(STANDARD.decode(encoded).is_ok());
    }

    #[test]
    fn decodes_a_completion_response() {
        let raw = r#"{"choices":[{"message":{"content":"Chicken Salad\nCalories: 350"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = parsed.choices[0].message.content.as_deref();
        assert_eq!(content, Some("Chicken Salad\nCalories: 350"));
    }

    #[test]
    fn decodes_a_structured_api_error() {
        let raw = r#"{"error":{"message":"rate limited","type":"requests"}}"#;
        let parsed: ErrorResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.error.message, "rate limited");
    }
}
