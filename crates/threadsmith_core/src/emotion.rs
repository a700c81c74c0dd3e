//! Discrete emotional states and the trajectory types built on them.
//!
//! Unlike a continuous valence/arousal model, conversation arcs move through
//! a small closed set of named emotions — each comment slot in a thread is
//! written "from inside" exactly one of them. Intensity is the only
//! continuous axis.

use serde::{Deserialize, Serialize};

/// The closed set of emotions a conversation stage can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Frustration,
    Curiosity,
    CautiousOptimism,
    Relief,
    Satisfaction,
    Excitement,
    Skepticism,
    Disappointment,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Frustration,
        Emotion::Curiosity,
        Emotion::CautiousOptimism,
        Emotion::Relief,
        Emotion::Satisfaction,
        Emotion::Excitement,
        Emotion::Skepticism,
        Emotion::Disappointment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Frustration => "frustration",
            Emotion::Curiosity => "curiosity",
            Emotion::CautiousOptimism => "cautious_optimism",
            Emotion::Relief => "relief",
            Emotion::Satisfaction => "satisfaction",
            Emotion::Excitement => "excitement",
            Emotion::Skepticism => "skepticism",
            Emotion::Disappointment => "disappointment",
        }
    }

    /// Natural-language rendering for prompt injection.
    pub fn describe(&self) -> &'static str {
        match self {
            Emotion::Frustration => "frustrated, worn down by the problem",
            Emotion::Curiosity => "curious, starting to poke at alternatives",
            Emotion::CautiousOptimism => "cautiously optimistic, not sold yet",
            Emotion::Relief => "relieved that something finally works",
            Emotion::Satisfaction => "satisfied, settled into the solution",
            Emotion::Excitement => "genuinely excited about the find",
            Emotion::Skepticism => "skeptical, expecting a catch",
            Emotion::Disappointment => "disappointed by yet another dead end",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of intensity change between consecutive stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trajectory {
    Escalating,
    Stable,
    Deescalating,
}

/// One stage of an emotional arc — the state a single comment is written from.
/// Immutable once generated; lives only for one conversation-generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalState {
    pub emotion: Emotion,
    /// Intensity in [0, 1].
    pub intensity: f32,
    pub trajectory: Trajectory,
    /// Free-text causes ("third outage this week", "saw it on a comparison post").
    pub triggers: Vec<String>,
    /// How long this state holds, in minutes of in-thread time.
    pub duration_minutes: u32,
}

impl EmotionalState {
    pub fn new(emotion: Emotion, intensity: f32, trajectory: Trajectory) -> Self {
        Self {
            emotion,
            intensity: intensity.clamp(0.0, 1.0),
            trajectory,
            triggers: Vec::new(),
            duration_minutes: 30,
        }
    }
}

/// A moment where the arc pivots from one emotion to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurningPoint {
    /// Index into the arc's progression. Strictly increasing across the list.
    pub position: usize,
    pub trigger: String,
    pub from: Emotion,
    pub to: Emotion,
    pub intensity: f32,
}

/// The full emotional trajectory of one conversation.
///
/// Invariant: `progression.len()` equals the arc template's comment-slot
/// count, and turning-point positions are strictly increasing indices into
/// `progression`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalArc {
    pub start: EmotionalState,
    pub progression: Vec<EmotionalState>,
    pub end: EmotionalState,
    pub turning_points: Vec<TurningPoint>,
}

/// One checkpoint on a frustration decay curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrustrationPoint {
    /// Elapsed in-thread time, minutes.
    pub minutes: u32,
    /// Frustration level in [0, 1].
    pub level: f32,
    pub triggers: Vec<String>,
    pub context: String,
}

/// Time-indexed frustration curve used to modulate downstream text tone.
///
/// Invariant: `peak` is the timeline point of maximum level; `resolution`
/// is always the last timeline point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrustrationCurve {
    pub timeline: Vec<FrustrationPoint>,
    pub peak: FrustrationPoint,
    pub resolution: FrustrationPoint,
    pub recovery: crate::persona::RecoverySpeed,
}

impl FrustrationCurve {
    /// Nearest-checkpoint lookup for arbitrary query times.
    /// Deliberately not interpolated — tone buckets, not a signal.
    pub fn frustration_at(&self, minutes: u32) -> f32 {
        self.timeline
            .iter()
            .min_by_key(|p| p.minutes.abs_diff(minutes))
            .map(|p| p.level)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotional_state_clamps_intensity() {
        let s = EmotionalState::new(Emotion::Frustration, 1.7, Trajectory::Stable);
        assert_eq!(s.intensity, 1.0);
        let s = EmotionalState::new(Emotion::Relief, -0.3, Trajectory::Stable);
        assert_eq!(s.intensity, 0.0);
    }

    #[test]
    fn test_frustration_at_nearest_checkpoint() {
        let point = |minutes, level| FrustrationPoint {
            minutes,
            level,
            triggers: vec![],
            context: String::new(),
        };
        let curve = FrustrationCurve {
            timeline: vec![point(0, 0.8), point(30, 0.5), point(60, 0.2)],
            peak: point(0, 0.8),
            resolution: point(60, 0.2),
            recovery: crate::persona::RecoverySpeed::Moderate,
        };
        assert_eq!(curve.frustration_at(0), 0.8);
        assert_eq!(curve.frustration_at(14), 0.8);
        assert_eq!(curve.frustration_at(16), 0.5);
        assert_eq!(curve.frustration_at(200), 0.2);
    }

    #[test]
    fn test_frustration_at_empty_timeline() {
        let curve = FrustrationCurve {
            timeline: vec![],
            peak: FrustrationPoint {
                minutes: 0,
                level: 0.0,
                triggers: vec![],
                context: String::new(),
            },
            resolution: FrustrationPoint {
                minutes: 0,
                level: 0.0,
                triggers: vec![],
                context: String::new(),
            },
            recovery: crate::persona::RecoverySpeed::Quick,
        };
        assert_eq!(curve.frustration_at(10), 0.0);
    }

    #[test]
    fn test_emotion_serde_snake_case() {
        let json = serde_json::to_string(&Emotion::CautiousOptimism).unwrap();
        assert_eq!(json, "\"cautious_optimism\"");
    }
}
