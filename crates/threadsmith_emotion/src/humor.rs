//! Humor opportunity detection.
//!
//! Scans an emotional arc for moments where a joke would land, scored by a
//! weighted appropriateness composite. Humor that doesn't fit the persona's
//! style, the community's formality, or the emotional moment is suppressed
//! outright rather than down-scored.

use serde::Serialize;
use threadsmith_core::{
    Emotion, EmotionalArc, EmotionalState, HumorType, Persona, SubredditContext, Trajectory,
};

/// Subreddit formality above which only dry humor survives.
const FORMALITY_HUMOR_CUTOFF: f32 = 0.7;
/// Minimum slot gap between two surfaced opportunities.
const MIN_GAP: usize = 2;

/// Where in the conversation a slot sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    Initiation,
    Development,
    Resolution,
}

pub(crate) fn phase_of(position: usize, len: usize) -> ConversationPhase {
    if position == 0 {
        ConversationPhase::Initiation
    } else if position + 1 == len {
        ConversationPhase::Resolution
    } else {
        ConversationPhase::Development
    }
}

/// The flavor of joke appropriate for a moment. Derived from the persona's
/// humor type rather than chosen freely — a dry persona doesn't suddenly
/// produce slapstick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HumorBeat {
    DryUnderstatement,
    SelfDeprecatingAside,
    ObservationalRiff,
    PlayfulExaggeration,
}

impl HumorBeat {
    fn for_style(kind: HumorType) -> Self {
        match kind {
            HumorType::Dry => HumorBeat::DryUnderstatement,
            HumorType::SelfDeprecating => HumorBeat::SelfDeprecatingAside,
            HumorType::Observational => HumorBeat::ObservationalRiff,
            HumorType::Playful => HumorBeat::PlayfulExaggeration,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HumorOpportunity {
    /// Index into the arc's progression.
    pub position: usize,
    pub beat: HumorBeat,
    /// 0-1 estimate of whether the joke fits this moment.
    pub appropriateness: f32,
}

/// Does this humor style have anything to say about this emotion?
fn style_matches(kind: HumorType, emotion: Emotion) -> bool {
    use Emotion::*;
    match kind {
        HumorType::Dry => matches!(emotion, Frustration | Skepticism | Disappointment),
        HumorType::SelfDeprecating => matches!(emotion, Frustration | Disappointment | Relief),
        HumorType::Observational => matches!(emotion, Curiosity | Skepticism | CautiousOptimism),
        HumorType::Playful => matches!(emotion, Excitement | Satisfaction | Curiosity | Relief),
    }
}

fn appropriateness(
    stage: &EmotionalState,
    phase: ConversationPhase,
    timing_multiplier: f32,
    subreddit_formality: f32,
) -> f32 {
    let mut score = 0.5 * timing_multiplier;

    score += match stage.trajectory {
        Trajectory::Deescalating => 0.2,
        Trajectory::Escalating => -0.1,
        Trajectory::Stable => 0.0,
    };

    // Jokes don't land at the emotional peak.
    if stage.intensity > 0.8 {
        score -= 0.2;
    }

    score += match phase {
        ConversationPhase::Resolution => 0.2,
        ConversationPhase::Initiation => -0.1,
        ConversationPhase::Development => 0.0,
    };

    if subreddit_formality > FORMALITY_HUMOR_CUTOFF {
        score -= 0.2;
    } else if subreddit_formality < 0.4 {
        score += 0.2;
    }

    score.clamp(0.0, 1.0)
}

/// Identify the moments in an arc where this persona's humor fits.
///
/// Returns an empty list for personas with no humor profile, and for any
/// non-dry persona in a formal community. Surfaced opportunities are capped
/// by the persona's humor frequency, keeping the top scorers in slot order.
pub fn identify_humor_opportunities(
    arc: &EmotionalArc,
    persona: &Persona,
    subreddit: &SubredditContext,
) -> Vec<HumorOpportunity> {
    let Some(style) = persona.humor.as_ref() else {
        return Vec::new();
    };

    if subreddit.formality > FORMALITY_HUMOR_CUTOFF && style.kind != HumorType::Dry {
        tracing::debug!(
            persona = %persona.id,
            subreddit = %subreddit.name,
            "humor suppressed: community too formal for style"
        );
        return Vec::new();
    }

    let len = arc.progression.len();
    let beat = HumorBeat::for_style(style.kind);
    let mut candidates = Vec::new();
    let mut last_emitted: Option<usize> = None;

    for (i, stage) in arc.progression.iter().enumerate() {
        if !style_matches(style.kind, stage.emotion) {
            continue;
        }
        // Anti-clustering: two jokes back to back read as a bit.
        if let Some(last) = last_emitted {
            if i - last < MIN_GAP {
                continue;
            }
        }
        let score = appropriateness(
            stage,
            phase_of(i, len),
            style.timing.multiplier(),
            subreddit.formality,
        );
        last_emitted = Some(i);
        candidates.push(HumorOpportunity {
            position: i,
            beat,
            appropriateness: score,
        });
    }

    // Keep the top-N by appropriateness, then restore slot order.
    candidates.sort_by(|a, b| {
        b.appropriateness
            .partial_cmp(&a.appropriateness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(style.frequency.cap());
    candidates.sort_by_key(|o| o.position);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc_engine::generate_emotional_arc;
    use std::collections::HashMap;
    use threadsmith_core::{
        ArcType, EmotionalProfile, HumorFrequency, HumorStyle, PromotionTolerance, RecoverySpeed,
        TimingQuality, VocabularyProfile,
    };

    fn persona(kind: HumorType, frequency: HumorFrequency, timing: TimingQuality) -> Persona {
        Persona {
            id: "t".into(),
            name: "t".into(),
            role: "dev".into(),
            vocabulary: VocabularyProfile::default(),
            style: "terse".into(),
            interests: vec![],
            emotions: Some(EmotionalProfile {
                intensities: HashMap::new(),
                recovery: RecoverySpeed::Moderate,
            }),
            humor: Some(HumorStyle {
                kind,
                frequency,
                timing,
            }),
        }
    }

    fn subreddit(formality: f32) -> SubredditContext {
        SubredditContext {
            name: "test".into(),
            formality,
            culture: "practitioner".into(),
            accepted_language: vec![],
            avoided_language: vec![],
            moderation_strictness: 0.5,
            promotion_tolerance: PromotionTolerance::Low,
            common_topics: vec![],
        }
    }

    #[test]
    fn test_formal_subreddit_suppresses_non_dry_humor() {
        let p = persona(
            HumorType::Playful,
            HumorFrequency::Frequent,
            TimingQuality::Perfect,
        );
        let arc = generate_emotional_arc(&p, ArcType::Discovery, "");
        let ops = identify_humor_opportunities(&arc, &p, &subreddit(0.8));
        assert!(ops.is_empty());
    }

    #[test]
    fn test_dry_humor_survives_formal_subreddit() {
        let p = persona(
            HumorType::Dry,
            HumorFrequency::Occasional,
            TimingQuality::Perfect,
        );
        // War story is frustration/disappointment heavy — dry territory.
        let arc = generate_emotional_arc(&p, ArcType::WarStory, "");
        let ops = identify_humor_opportunities(&arc, &p, &subreddit(0.8));
        assert!(!ops.is_empty());
    }

    #[test]
    fn test_no_humor_profile_no_opportunities() {
        let mut p = persona(
            HumorType::Dry,
            HumorFrequency::Frequent,
            TimingQuality::Perfect,
        );
        p.humor = None;
        let arc = generate_emotional_arc(&p, ArcType::Discovery, "");
        assert!(identify_humor_opportunities(&arc, &p, &subreddit(0.3)).is_empty());
    }

    #[test]
    fn test_frequency_caps_results() {
        let p = persona(
            HumorType::Playful,
            HumorFrequency::Rare,
            TimingQuality::Perfect,
        );
        // Discovery ends in relief/satisfaction — playful matches several slots.
        let arc = generate_emotional_arc(&p, ArcType::Discovery, "");
        let ops = identify_humor_opportunities(&arc, &p, &subreddit(0.3));
        assert!(ops.len() <= 1);
    }

    #[test]
    fn test_anti_clustering_gap() {
        let p = persona(
            HumorType::Playful,
            HumorFrequency::Frequent,
            TimingQuality::Perfect,
        );
        let arc = generate_emotional_arc(&p, ArcType::Discovery, "");
        let ops = identify_humor_opportunities(&arc, &p, &subreddit(0.3));
        for pair in ops.windows(2) {
            assert!(pair[1].position - pair[0].position >= MIN_GAP);
        }
    }

    #[test]
    fn test_appropriateness_within_unit_interval() {
        for kind in [
            HumorType::Dry,
            HumorType::SelfDeprecating,
            HumorType::Observational,
            HumorType::Playful,
        ] {
            let p = persona(kind, HumorFrequency::Frequent, TimingQuality::Inappropriate);
            for arc_type in ArcType::ALL {
                let arc = generate_emotional_arc(&p, arc_type, "");
                for op in identify_humor_opportunities(&arc, &p, &subreddit(0.5)) {
                    assert!(op.appropriateness >= 0.0 && op.appropriateness <= 1.0);
                }
            }
        }
    }

    #[test]
    fn test_results_ordered_by_position() {
        let p = persona(
            HumorType::SelfDeprecating,
            HumorFrequency::Frequent,
            TimingQuality::Good,
        );
        let arc = generate_emotional_arc(&p, ArcType::WarStory, "");
        let ops = identify_humor_opportunities(&arc, &p, &subreddit(0.3));
        for pair in ops.windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
    }
}
