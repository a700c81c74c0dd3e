//! Multi-pass generation controller.
//!
//! Per content unit: raw draft at high temperature, humanizing rewrite at
//! moderate temperature, strict low-temperature self-validation. Bounded
//! outer retries, best-candidate tracking, and a hard-coded fallback when
//! nothing usable comes back. Nothing escapes this boundary — the caller
//! always gets a string.

use crate::llm::{SamplingParams, TextGenerator};
use crate::prompts;
use crate::validation::ValidationReport;
use std::sync::Arc;
use std::time::Duration;
use threadsmith_core::{
    GenerationConfig, MultiPassResult, PassMetadata, PassSnapshots, Persona,
};

/// What kind of content unit is being generated; selects the fallback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Post,
    Comment,
    Reply,
}

impl ContentKind {
    /// Last-resort content when every attempt produced nothing.
    /// Bland on purpose — syntactically valid beats clever here.
    fn fallback(&self) -> &'static str {
        match self {
            ContentKind::Post => {
                "anyone else dealing with this?\n\nbeen going back and forth on this all week \
                 and not getting anywhere. curious how everyone else handles it"
            }
            ContentKind::Comment => "been struggling with this lately... following for the answers",
            ContentKind::Reply => "yeah that tracks, thanks. will give it a shot",
        }
    }
}

/// Validator score assigned to fallback content.
const FALLBACK_SCORE: u8 = 40;

pub struct MultiPassController {
    generator: Arc<dyn TextGenerator>,
    config: GenerationConfig,
}

impl MultiPassController {
    pub fn new(generator: Arc<dyn TextGenerator>, config: GenerationConfig) -> Self {
        Self { generator, config }
    }

    /// One provider call under the configured deadline. Timeouts and
    /// provider errors both collapse to None — at this layer they mean the
    /// same thing: no usable text this time.
    async fn call(&self, prompt: &str, temperature: f32) -> Option<String> {
        let params = SamplingParams::with_temperature(temperature);
        let deadline = Duration::from_secs(self.config.call_timeout_secs);
        match tokio::time::timeout(deadline, self.generator.complete(prompt, params)).await {
            Ok(Ok(text)) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    None
                } else {
                    Some(text)
                }
            }
            Ok(Err(e)) => {
                tracing::warn!("generation call failed: {e}");
                None
            }
            Err(_) => {
                tracing::warn!("generation call timed out after {}s", deadline.as_secs());
                None
            }
        }
    }

    /// Run the full raw → authenticity → validation sequence for one
    /// content unit. Never errors; the result always carries usable text.
    pub async fn generate(
        &self,
        kind: ContentKind,
        domain_prompt: &str,
        persona: &Persona,
    ) -> MultiPassResult {
        let started = std::time::Instant::now();
        let mut best: Option<(MultiPassResult, u8)> = None;

        for attempt in 1..=self.config.max_attempts {
            // Pass 1: raw draft.
            let Some(raw) = self.call(domain_prompt, self.config.raw_temperature).await else {
                tracing::debug!(attempt, "raw pass empty, retrying");
                continue;
            };

            // Pass 2: humanizing rewrite.
            let polish_prompt = prompts::authenticity_prompt(&raw, persona);
            let Some(authentic) = self
                .call(&polish_prompt, self.config.polish_temperature)
                .await
            else {
                tracing::debug!(attempt, "authenticity pass empty, retrying");
                continue;
            };

            // Pass 3: self-validation. A missing or garbled response parses
            // to the conservative default rather than aborting the attempt.
            let validation_text = self
                .call(
                    &prompts::validation_prompt(&authentic),
                    self.config.validation_temperature,
                )
                .await
                .unwrap_or_default();
            let report = ValidationReport::parse(&validation_text);

            let accepted = report.passed && report.score >= self.config.acceptance_score;
            let result = MultiPassResult {
                final_content: authentic.clone(),
                passes: PassSnapshots {
                    raw: Some(raw),
                    authentic: Some(authentic),
                    validated: Some(validation_text),
                },
                quality_score: report.score,
                metadata: PassMetadata {
                    attempts: attempt,
                    duration_ms: started.elapsed().as_millis() as u64,
                    passed_validation: accepted,
                },
            };

            if accepted {
                tracing::debug!(attempt, score = report.score, "content accepted");
                return result;
            }

            // Keep the best-scoring rejected attempt as a fallback candidate.
            if best.as_ref().map(|(_, s)| report.score > *s).unwrap_or(true) {
                best = Some((result, report.score));
            }
        }

        if let Some((mut result, score)) = best {
            tracing::info!(
                score,
                "no attempt passed validation, returning best candidate"
            );
            result.metadata.attempts = self.config.max_attempts;
            result.metadata.duration_ms = started.elapsed().as_millis() as u64;
            return result;
        }

        // Every attempt died before producing text.
        tracing::warn!("all generation attempts empty, using fallback content");
        MultiPassResult {
            final_content: kind.fallback().to_string(),
            passes: PassSnapshots::default(),
            quality_score: FALLBACK_SCORE,
            metadata: PassMetadata {
                attempts: self.config.max_attempts,
                duration_ms: started.elapsed().as_millis() as u64,
                passed_validation: false,
            },
        }
    }
}
