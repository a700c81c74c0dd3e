//! Vulnerability moment detection.
//!
//! Flags the points in an arc where an admission of weakness reads as
//! honest rather than performative. Same composite-scoring shape as the
//! humor detector, but keyed on the emotion itself instead of a persona
//! humor style — everyone can admit they were wrong; not everyone jokes.

use crate::humor::{phase_of, ConversationPhase};
use serde::Serialize;
use threadsmith_core::{Emotion, EmotionalArc, EmotionalState, Persona, SubredditContext, Trajectory};

/// Minimum slot gap between surfaced moments.
const MIN_GAP: usize = 2;
/// At most this many vulnerability moments per conversation.
const MAX_MOMENTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnerabilityKind {
    /// "I'm honestly stuck on this."
    StruggleAdmission,
    /// "We tried that last year and it blew up."
    PastFailure,
    /// "Not sure this is right, but..."
    Uncertainty,
}

#[derive(Debug, Clone, Serialize)]
pub struct VulnerabilityMoment {
    /// Index into the arc's progression.
    pub position: usize,
    pub kind: VulnerabilityKind,
    /// 0-1 estimate of whether the admission fits this moment.
    pub appropriateness: f32,
}

/// Which kind of admission a stage invites, if any.
fn kind_for(stage: &EmotionalState, previous: Option<&EmotionalState>) -> Option<VulnerabilityKind> {
    use Emotion::*;
    match stage.emotion {
        Frustration | Disappointment => Some(VulnerabilityKind::StruggleAdmission),
        // Relief right after a negative stretch invites the retrospective
        // "here's what I was doing wrong" beat.
        Relief
            if previous
                .map(|p| matches!(p.emotion, Frustration | Disappointment))
                .unwrap_or(false) =>
        {
            Some(VulnerabilityKind::PastFailure)
        }
        Skepticism | CautiousOptimism => Some(VulnerabilityKind::Uncertainty),
        _ => None,
    }
}

fn appropriateness(
    stage: &EmotionalState,
    phase: ConversationPhase,
    persona_formality: f32,
    subreddit_formality: f32,
) -> f32 {
    let mut score = 0.5;

    // Informal voices open up more easily.
    score += (1.0 - persona_formality) * 0.2;

    score += match stage.trajectory {
        Trajectory::Deescalating => 0.2,
        Trajectory::Escalating => -0.1,
        Trajectory::Stable => 0.0,
    };

    // Raw peaks read as venting, not vulnerability.
    if stage.intensity > 0.8 {
        score -= 0.2;
    }

    score += match phase {
        ConversationPhase::Resolution => 0.2,
        ConversationPhase::Initiation => -0.1,
        ConversationPhase::Development => 0.0,
    };

    if subreddit_formality > 0.7 {
        score -= 0.2;
    } else if subreddit_formality < 0.4 {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

/// Identify the moments in an arc where an admission of weakness fits.
pub fn identify_vulnerability_moments(
    arc: &EmotionalArc,
    persona: &Persona,
    subreddit: &SubredditContext,
) -> Vec<VulnerabilityMoment> {
    let len = arc.progression.len();
    let mut candidates = Vec::new();
    let mut last_emitted: Option<usize> = None;

    for (i, stage) in arc.progression.iter().enumerate() {
        let previous = if i > 0 { arc.progression.get(i - 1) } else { None };
        let Some(kind) = kind_for(stage, previous) else {
            continue;
        };
        if let Some(last) = last_emitted {
            if i - last < MIN_GAP {
                continue;
            }
        }
        let score = appropriateness(
            stage,
            phase_of(i, len),
            persona.vocabulary.formality,
            subreddit.formality,
        );
        last_emitted = Some(i);
        candidates.push(VulnerabilityMoment {
            position: i,
            kind,
            appropriateness: score,
        });
    }

    candidates.sort_by(|a, b| {
        b.appropriateness
            .partial_cmp(&a.appropriateness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(MAX_MOMENTS);
    candidates.sort_by_key(|m| m.position);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc_engine::generate_emotional_arc;
    use threadsmith_core::{ArcType, PromotionTolerance, VocabularyProfile};

    fn persona(formality: f32) -> Persona {
        Persona {
            id: "t".into(),
            name: "t".into(),
            role: "dev".into(),
            vocabulary: VocabularyProfile {
                characteristic_phrases: vec![],
                avoided_phrases: vec![],
                formality,
            },
            style: "terse".into(),
            interests: vec![],
            emotions: None,
            humor: None,
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
    fn test_war_story_yields_moments() {
        let p = persona(0.3);
        let arc = generate_emotional_arc(&p, ArcType::WarStory, "");
        let moments = identify_vulnerability_moments(&arc, &p, &subreddit(0.4));
        assert!(!moments.is_empty());
        assert!(moments.len() <= MAX_MOMENTS);
    }

    #[test]
    fn test_relief_after_frustration_is_past_failure() {
        let p = persona(0.3);
        // problem_solver: frustration, frustration, curiosity, relief, satisfaction —
        // relief at index 3 follows curiosity, so no past-failure beat there.
        // war_story: ..., disappointment(2), relief(3) — that one qualifies.
        let arc = generate_emotional_arc(&p, ArcType::WarStory, "");
        let moments = identify_vulnerability_moments(&arc, &p, &subreddit(0.4));
        let kinds: Vec<_> = moments.iter().map(|m| m.kind).collect();
        assert!(
            kinds.contains(&VulnerabilityKind::StruggleAdmission)
                || kinds.contains(&VulnerabilityKind::PastFailure)
        );
    }

    #[test]
    fn test_informal_persona_scores_higher() {
        let informal = persona(0.1);
        let formal = persona(0.9);
        let arc_informal = generate_emotional_arc(&informal, ArcType::Discovery, "");
        let arc_formal = generate_emotional_arc(&formal, ArcType::Discovery, "");
        let mi = identify_vulnerability_moments(&arc_informal, &informal, &subreddit(0.4));
        let mf = identify_vulnerability_moments(&arc_formal, &formal, &subreddit(0.4));
        let max_i = mi.iter().map(|m| m.appropriateness).fold(0.0f32, f32::max);
        let max_f = mf.iter().map(|m| m.appropriateness).fold(0.0f32, f32::max);
        assert!(max_i > max_f);
    }

    #[test]
    fn test_scores_within_unit_interval_and_gap_respected() {
        let p = persona(0.5);
        for arc_type in ArcType::ALL {
            let arc = generate_emotional_arc(&p, arc_type, "");
            let moments = identify_vulnerability_moments(&arc, &p, &subreddit(0.6));
            for m in &moments {
                assert!(m.appropriateness >= 0.0 && m.appropriateness <= 1.0);
            }
            for pair in moments.windows(2) {
                assert!(pair[1].position - pair[0].position >= MIN_GAP);
            }
        }
    }
}
