//! Mock text generator — deterministic responses for testing without API keys.

use crate::llm::{SamplingParams, TextGenerator};
use anyhow::Result;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays a scripted sequence of responses, then falls back to a repeated
/// default. An empty-string default simulates a dead provider.
pub struct MockGenerator {
    script: Mutex<VecDeque<String>>,
    default: String,
    calls: Mutex<Vec<String>>,
}

impl MockGenerator {
    /// Every call returns `response`.
    pub fn always(response: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default: response.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replay `responses` in order, then return empty strings.
    pub fn scripted(responses: Vec<&str>) -> Self {
        Self {
            script: Mutex::new(responses.into_iter().map(String::from).collect()),
            default: String::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always returns empty — the "provider is down" case.
    pub fn silent() -> Self {
        Self::always("")
    }

    /// Prompts seen so far, for assertions.
    pub fn seen_prompts(&self) -> Vec<String> {
        self.calls.lock().expect("mock lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock lock").len()
    }
}

#[async_trait::async_trait]
impl TextGenerator for MockGenerator {
    async fn complete(&self, prompt: &str, _params: SamplingParams) -> Result<String> {
        self.calls
            .lock()
            .expect("mock lock")
            .push(prompt.to_string());
        let next = self.script.lock().expect("mock lock").pop_front();
        Ok(next.unwrap_or_else(|| self.default.clone()))
    }
}
