use crate::llm::{SamplingParams, TextGenerator};
use crate::retry::{with_retry, RetryConfig};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct AnthropicGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicGenerator {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://api.anthropic.com".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read the key from ANTHROPIC_API_KEY.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key =
            std::env::var("ANTHROPIC_API_KEY").context("ANTHROPIC_API_KEY is not set")?;
        Ok(Self::new(api_key, model))
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[async_trait::async_trait]
impl TextGenerator for AnthropicGenerator {
    #[tracing::instrument(skip(self, prompt, params), fields(model = %self.model))]
    async fn complete(&self, prompt: &str, params: SamplingParams) -> Result<String> {
        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));

        let request_body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: params.max_tokens,
            // Anthropic accepts 0.0-1.0; higher pass temperatures clamp down.
            temperature: params.temperature.clamp(0.0, 1.0),
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        tracing::debug!(
            "completion params: max_tokens={}, temperature={:.2}",
            params.max_tokens,
            params.temperature
        );

        let retry_config = RetryConfig::default();
        let client = &self.client;
        let api_key = &self.api_key;

        let response = with_retry(&retry_config, "Anthropic", || async {
            let resp = client
                .post(&url)
                .header("x-api-key", api_key)
                .header("anthropic-version", "2023-06-01")
                .json(&request_body)
                .send()
                .await
                .context("Failed to send request to Anthropic")?;
            Ok(resp)
        })
        .await?;

        let resp_text = response.text().await?;
        let api_response: MessagesResponse = serde_json::from_str(&resp_text)
            .context("Failed to parse Anthropic response")?;

        let text = api_response
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(text)
    }
}
