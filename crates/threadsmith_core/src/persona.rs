//! Synthetic author profiles.
//!
//! A persona is immutable reference data — the pipeline reads it, never
//! mutates it. The emotional and humor sub-profiles are optional: a bare
//! persona still works everywhere, it just gets neutral scaling and no
//! humor opportunities.

use crate::emotion::Emotion;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How quickly a persona's frustration decays once things improve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoverySpeed {
    Quick,
    Moderate,
    Slow,
}

impl RecoverySpeed {
    /// Multiplier applied to a frustration stage that follows another
    /// frustration stage. Quick recoverers cool off; slow ones stew.
    pub fn carryover_multiplier(&self) -> f32 {
        match self {
            RecoverySpeed::Quick => 0.6,
            RecoverySpeed::Moderate => 0.8,
            RecoverySpeed::Slow => 1.1,
        }
    }

    /// Per-10-minute exponential decay base for the frustration curve.
    pub fn decay_base(&self) -> f32 {
        match self {
            RecoverySpeed::Quick => 0.95,
            RecoverySpeed::Moderate => 0.97,
            RecoverySpeed::Slow => 0.99,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumorType {
    Dry,
    SelfDeprecating,
    Observational,
    Playful,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingQuality {
    Perfect,
    Good,
    Inappropriate,
}

impl TimingQuality {
    pub fn multiplier(&self) -> f32 {
        match self {
            TimingQuality::Perfect => 1.0,
            TimingQuality::Good => 0.8,
            TimingQuality::Inappropriate => 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumorFrequency {
    Rare,
    Occasional,
    Frequent,
}

impl HumorFrequency {
    /// Maximum humor opportunities surfaced per conversation.
    pub fn cap(&self) -> usize {
        match self {
            HumorFrequency::Rare => 1,
            HumorFrequency::Occasional => 2,
            HumorFrequency::Frequent => 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumorStyle {
    pub kind: HumorType,
    pub frequency: HumorFrequency,
    pub timing: TimingQuality,
}

/// Per-emotion intensity scaling plus recovery speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalProfile {
    /// Scaling factor per emotion. Missing entries scale by 1.0.
    #[serde(default)]
    pub intensities: HashMap<Emotion, f32>,
    pub recovery: RecoverySpeed,
}

impl EmotionalProfile {
    pub fn intensity_of(&self, emotion: Emotion) -> f32 {
        self.intensities.get(&emotion).copied().unwrap_or(1.0)
    }
}

impl Default for EmotionalProfile {
    fn default() -> Self {
        Self {
            intensities: HashMap::new(),
            recovery: RecoverySpeed::Moderate,
        }
    }
}

/// Phrases a persona reaches for, phrases they never use, and how formal
/// they sound overall.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyProfile {
    pub characteristic_phrases: Vec<String>,
    pub avoided_phrases: Vec<String>,
    /// 0.0 = shitposter, 1.0 = writes like documentation.
    pub formality: f32,
}

/// A synthetic author. One superset struct — the optional sub-profiles
/// replace the old basic/enhanced split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub role: String,
    pub vocabulary: VocabularyProfile,
    /// Communication-style tag ("terse", "storyteller", "helpful-detailed").
    pub style: String,
    pub interests: Vec<String>,
    #[serde(default)]
    pub emotions: Option<EmotionalProfile>,
    #[serde(default)]
    pub humor: Option<HumorStyle>,
}

impl Persona {
    /// Per-emotion intensity scaling; neutral 1.0 when no emotional profile.
    pub fn emotion_intensity(&self, emotion: Emotion) -> f32 {
        self.emotions
            .as_ref()
            .map(|p| p.intensity_of(emotion))
            .unwrap_or(1.0)
    }

    /// Recovery speed, defaulting to moderate for bare personas.
    pub fn recovery_speed(&self) -> RecoverySpeed {
        self.emotions
            .as_ref()
            .map(|p| p.recovery)
            .unwrap_or(RecoverySpeed::Moderate)
    }
}
