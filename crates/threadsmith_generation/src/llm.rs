use anyhow::Result;
use async_trait::async_trait;

/// Sampling parameters for one completion, set per multi-pass stage.
#[derive(Debug, Clone)]
pub struct SamplingParams {
    /// Sampling temperature (provider clamps to its own limits).
    pub temperature: f32,
    pub max_tokens: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

impl SamplingParams {
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature,
            ..Self::default()
        }
    }
}

/// The text-generation service boundary. One prompt in, one string out;
/// everything behind it is opaque to the pipeline. Implementations must
/// be callable concurrently.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str, params: SamplingParams) -> Result<String>;
}
