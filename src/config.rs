use std::env;

/// Settings for the vision API call. Everything except the key has a
/// default matching the hosted OpenAI chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl VisionConfig {
    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| "OPENAI_API_KEY environment variable not set".to_string())?;
        Ok(Self::with_api_key(api_key))
    }

    pub fn with_api_key(api_key: String) -> Self {
        let api_url = env::var("OPENAI_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());

        let model = env::var("VISION_MODEL").unwrap_or_else(|_| "gpt-4-vision-preview".to_string());

        let max_tokens = env::var("VISION_MAX_TOKENS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(1000);

        let temperature = env::var("VISION_TEMPERATURE")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0.2);

        Self {
            api_key,
            api_url,
            model,
            max_tokens,
            temperature,
        }
    }
}
