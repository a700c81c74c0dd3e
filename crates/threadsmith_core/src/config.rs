use crate::emotion::Emotion;
use crate::error::ThreadsmithError;
use crate::persona::{
    EmotionalProfile, HumorFrequency, HumorStyle, HumorType, Persona, RecoverySpeed, TimingQuality,
    VocabularyProfile,
};
use crate::subreddit::{PromotionTolerance, SubredditContext};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub llm: LlmConfig,
    pub generation: GenerationConfig,
    pub schedule: ScheduleConfig,
}

impl PipelineConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields. Env var overrides are applied after loading.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: PipelineConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file doesn't exist, return defaults
    /// with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("THREADSMITH_PROVIDER") {
            self.llm.provider = v;
        }
        if let Ok(v) = std::env::var("THREADSMITH_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("THREADSMITH_BASE_URL") {
            self.llm.base_url = Some(v);
        }
        if let Ok(v) = std::env::var("THREADSMITH_MAX_TOKENS") {
            if let Ok(n) = v.parse() {
                self.llm.max_tokens = n;
            }
        }
        if let Ok(v) = std::env::var("THREADSMITH_CALL_TIMEOUT_SECS") {
            if let Ok(n) = v.parse() {
                self.generation.call_timeout_secs = n;
            }
        }
        if let Ok(v) = std::env::var("THREADSMITH_MAX_ATTEMPTS") {
            if let Ok(n) = v.parse() {
                self.generation.max_attempts = n;
            }
        }
        if let Ok(v) = std::env::var("THREADSMITH_QUALITY_THRESHOLD") {
            if let Ok(n) = v.parse() {
                self.schedule.quality_threshold = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub base_url: Option<String>,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: None,
            max_tokens: 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Outer retries per content unit in the multi-pass controller.
    pub max_attempts: u32,
    /// Validator score required (with passed=true) to accept early.
    pub acceptance_score: u8,
    /// Sampling temperature per pass.
    pub raw_temperature: f32,
    pub polish_temperature: f32,
    pub validation_temperature: f32,
    /// Hard deadline per provider call. A timeout counts as an empty result.
    pub call_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            acceptance_score: 70,
            raw_temperature: 1.2,
            polish_temperature: 0.9,
            validation_temperature: 0.3,
            call_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub threads_per_week: usize,
    /// Minimum thread-level quality score the weekly builder accepts before
    /// giving up and keeping the best candidate.
    pub quality_threshold: f32,
    /// Fixed pacing delay between thread generations, in milliseconds.
    pub pacing_delay_ms: u64,
    /// Bounded regenerations per scheduled slot when below threshold.
    pub regen_attempts: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            threads_per_week: 5,
            quality_threshold: 70.0,
            pacing_delay_ms: 1000,
            regen_attempts: 2,
        }
    }
}

// ============================================================================
// Reference data
// ============================================================================

/// Read-only persona and subreddit roster, constructed once and passed into
/// every component. There is no global registry.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub personas: Vec<Persona>,
    pub subreddits: Vec<SubredditContext>,
}

impl ReferenceData {
    pub fn persona(&self, id: &str) -> Result<&Persona, ThreadsmithError> {
        self.personas
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ThreadsmithError::UnknownPersona(id.to_string()))
    }

    pub fn subreddit(&self, name: &str) -> Result<&SubredditContext, ThreadsmithError> {
        self.subreddits
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ThreadsmithError::UnknownSubreddit(name.to_string()))
    }

    /// The built-in roster: five personas with distinct voices and three
    /// practitioner subreddit profiles.
    pub fn builtin() -> Self {
        Self {
            personas: builtin_personas(),
            subreddits: builtin_subreddits(),
        }
    }
}

fn intensities(pairs: &[(Emotion, f32)]) -> HashMap<Emotion, f32> {
    pairs.iter().copied().collect()
}

fn builtin_personas() -> Vec<Persona> {
    vec![
        Persona {
            id: "tired_sre".into(),
            name: "marta".into(),
            role: "site reliability engineer".into(),
            vocabulary: VocabularyProfile {
                characteristic_phrases: vec![
                    "for what it's worth".into(),
                    "ymmv".into(),
                    "we got paged".into(),
                ],
                avoided_phrases: vec!["synergy".into(), "leverage".into()],
                formality: 0.35,
            },
            style: "terse".into(),
            interests: vec!["monitoring".into(), "on-call".into(), "kubernetes".into()],
            emotions: Some(EmotionalProfile {
                intensities: intensities(&[
                    (Emotion::Frustration, 1.2),
                    (Emotion::Excitement, 0.6),
                ]),
                recovery: RecoverySpeed::Slow,
            }),
            humor: Some(HumorStyle {
                kind: HumorType::Dry,
                frequency: HumorFrequency::Occasional,
                timing: TimingQuality::Perfect,
            }),
        },
        Persona {
            id: "indie_hacker".into(),
            name: "devon".into(),
            role: "solo founder".into(),
            vocabulary: VocabularyProfile {
                characteristic_phrases: vec![
                    "shipped it anyway".into(),
                    "honestly".into(),
                ],
                avoided_phrases: vec!["utilize".into()],
                formality: 0.2,
            },
            style: "storyteller".into(),
            interests: vec!["saas".into(), "automation".into(), "analytics".into()],
            emotions: Some(EmotionalProfile {
                intensities: intensities(&[
                    (Emotion::Excitement, 1.3),
                    (Emotion::Frustration, 0.9),
                ]),
                recovery: RecoverySpeed::Quick,
            }),
            humor: Some(HumorStyle {
                kind: HumorType::SelfDeprecating,
                frequency: HumorFrequency::Frequent,
                timing: TimingQuality::Good,
            }),
        },
        Persona {
            id: "careful_lead".into(),
            name: "priya".into(),
            role: "engineering lead".into(),
            vocabulary: VocabularyProfile {
                characteristic_phrases: vec![
                    "in our case".into(),
                    "trade-off".into(),
                ],
                avoided_phrases: vec!["game changer".into()],
                formality: 0.7,
            },
            style: "helpful-detailed".into(),
            interests: vec!["databases".into(), "observability".into(), "hiring".into()],
            emotions: Some(EmotionalProfile {
                intensities: intensities(&[
                    (Emotion::Skepticism, 1.2),
                    (Emotion::Frustration, 0.8),
                ]),
                recovery: RecoverySpeed::Moderate,
            }),
            humor: Some(HumorStyle {
                kind: HumorType::Observational,
                frequency: HumorFrequency::Rare,
                timing: TimingQuality::Good,
            }),
        },
        Persona {
            id: "weekend_tinkerer".into(),
            name: "sam".into(),
            role: "hobbyist".into(),
            vocabulary: VocabularyProfile {
                characteristic_phrases: vec![
                    "down the rabbit hole".into(),
                    "turns out".into(),
                ],
                avoided_phrases: vec![],
                formality: 0.25,
            },
            style: "enthusiastic".into(),
            interests: vec!["homelab".into(), "self-hosting".into(), "automation".into()],
            emotions: Some(EmotionalProfile {
                intensities: intensities(&[
                    (Emotion::Curiosity, 1.3),
                    (Emotion::Disappointment, 0.7),
                ]),
                recovery: RecoverySpeed::Quick,
            }),
            humor: Some(HumorStyle {
                kind: HumorType::Playful,
                frequency: HumorFrequency::Frequent,
                timing: TimingQuality::Inappropriate,
            }),
        },
        Persona {
            id: "pragmatic_consultant".into(),
            name: "jordan".into(),
            role: "freelance consultant".into(),
            vocabulary: VocabularyProfile {
                characteristic_phrases: vec![
                    "depends on the client".into(),
                    "seen this go both ways".into(),
                ],
                avoided_phrases: vec!["best in class".into()],
                formality: 0.55,
            },
            style: "balanced".into(),
            interests: vec!["consulting".into(), "integrations".into(), "billing".into()],
            emotions: None,
            humor: None,
        },
    ]
}

fn builtin_subreddits() -> Vec<SubredditContext> {
    vec![
        SubredditContext {
            name: "sysadmin".into(),
            formality: 0.45,
            culture: "war-stories".into(),
            accepted_language: vec!["prod".into(), "on-call".into(), "ticket".into()],
            avoided_language: vec!["growth hack".into(), "disrupt".into()],
            moderation_strictness: 0.6,
            promotion_tolerance: PromotionTolerance::Low,
            common_topics: vec![
                "backups".into(),
                "monitoring".into(),
                "patching".into(),
                "on-call".into(),
            ],
        },
        SubredditContext {
            name: "selfhosted".into(),
            formality: 0.3,
            culture: "hobbyist".into(),
            accepted_language: vec!["docker".into(), "homelab".into(), "compose".into()],
            avoided_language: vec!["enterprise-grade".into()],
            moderation_strictness: 0.4,
            promotion_tolerance: PromotionTolerance::Medium,
            common_topics: vec![
                "docker".into(),
                "reverse proxy".into(),
                "backups".into(),
                "automation".into(),
            ],
        },
        SubredditContext {
            name: "devops".into(),
            formality: 0.6,
            culture: "practitioner".into(),
            accepted_language: vec!["pipeline".into(), "terraform".into(), "slo".into()],
            avoided_language: vec!["revolutionary".into()],
            moderation_strictness: 0.7,
            promotion_tolerance: PromotionTolerance::None,
            common_topics: vec![
                "ci".into(),
                "kubernetes".into(),
                "observability".into(),
                "incident response".into(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.generation.max_attempts, 2);
        assert_eq!(cfg.generation.acceptance_score, 70);
        assert!((cfg.generation.raw_temperature - 1.2).abs() < 1e-6);
        assert_eq!(cfg.schedule.pacing_delay_ms, 1000);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: PipelineConfig = toml::from_str(
            r#"
            [generation]
            max_attempts = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.generation.max_attempts, 3);
        assert_eq!(cfg.generation.acceptance_score, 70);
        assert_eq!(cfg.llm.provider, "anthropic");
    }

    #[test]
    fn test_builtin_roster_lookups() {
        let data = ReferenceData::builtin();
        assert!(data.persona("tired_sre").is_ok());
        assert!(matches!(
            data.persona("nobody"),
            Err(ThreadsmithError::UnknownPersona(_))
        ));
        assert!(data.subreddit("sysadmin").is_ok());
        assert!(matches!(
            data.subreddit("r_missing"),
            Err(ThreadsmithError::UnknownSubreddit(_))
        ));
    }

    #[test]
    fn test_builtin_personas_have_distinct_ids() {
        let data = ReferenceData::builtin();
        let mut ids: Vec<_> = data.personas.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), data.personas.len());
    }
}
