//! Frustration decay curves.
//!
//! A specialization of the arc engine tracking a single metric over
//! in-thread time. Three checkpoint timelines cover all seven arcs; each
//! checkpoint's base level is scaled by the persona's frustration affinity
//! and decayed exponentially by elapsed time at a rate set by the persona's
//! recovery speed.

use threadsmith_core::{ArcType, Emotion, FrustrationCurve, FrustrationPoint, Persona};

struct Checkpoint {
    minutes: u32,
    base_level: f32,
    trigger: &'static str,
    context: &'static str,
}

fn cp(minutes: u32, base_level: f32, trigger: &'static str, context: &'static str) -> Checkpoint {
    Checkpoint {
        minutes,
        base_level,
        trigger,
        context,
    }
}

/// Which of the three built-in timelines an arc uses. Total over `ArcType`.
fn timeline(arc: ArcType) -> Vec<Checkpoint> {
    match arc {
        // Gradual realization arcs: start annoyed, cool off as options appear.
        ArcType::Discovery | ArcType::Comparison | ArcType::QuickWin => vec![
            cp(0, 0.7, "the problem resurfaces", "writing the post"),
            cp(20, 0.75, "early replies just commiserate", "reading first comments"),
            cp(45, 0.5, "a concrete suggestion arrives", "weighing the suggestion"),
            cp(90, 0.3, "the trial run works", "reporting back"),
            cp(180, 0.15, "it keeps working", "wrapping up the thread"),
        ],
        // Active-incident arcs: sharper peak, faster drop once fixed.
        ArcType::ProblemSolver | ArcType::CommunityHelp | ArcType::SkepticConvert => vec![
            cp(0, 0.8, "the failure is live", "writing the post mid-incident"),
            cp(15, 0.85, "first suggestions miss", "triaging replies"),
            cp(40, 0.6, "root cause narrows down", "testing the hypothesis"),
            cp(90, 0.35, "fix confirmed", "verifying in prod"),
            cp(240, 0.2, "stable since the fix", "closing the loop"),
        ],
        // Retrospective arcs: the telling re-heats the feeling, then it fades.
        ArcType::WarStory => vec![
            cp(0, 0.9, "reliving the outage", "writing the story"),
            cp(30, 0.85, "commenters share matching horror", "reading responses"),
            cp(60, 0.7, "the worst detail resurfaces", "answering questions"),
            cp(120, 0.45, "distance kicks in", "reflecting on lessons"),
            cp(360, 0.25, "it's just a story now", "final follow-ups"),
        ],
    }
}

/// Generate the persona-adjusted frustration curve for one conversation.
pub fn generate_frustration_curve(
    persona: &Persona,
    problem: &str,
    arc: ArcType,
) -> FrustrationCurve {
    let recovery = persona.recovery_speed();
    let affinity = persona.emotion_intensity(Emotion::Frustration);
    let decay_base = recovery.decay_base();

    let points: Vec<FrustrationPoint> = timeline(arc)
        .into_iter()
        .map(|c| {
            let decay = decay_base.powf(c.minutes as f32 / 10.0);
            let level = (c.base_level * affinity * decay).clamp(0.0, 1.0);
            let mut triggers = vec![c.trigger.to_string()];
            if c.minutes == 0 && !problem.is_empty() {
                triggers.push(problem.to_string());
            }
            FrustrationPoint {
                minutes: c.minutes,
                level,
                triggers,
                context: c.context.to_string(),
            }
        })
        .collect();

    // peak = arg-max over the timeline; resolution = last checkpoint.
    let peak = points
        .iter()
        .max_by(|a, b| a.level.partial_cmp(&b.level).unwrap_or(std::cmp::Ordering::Equal))
        .cloned()
        .expect("timelines are non-empty");
    let resolution = points.last().cloned().expect("timelines are non-empty");

    FrustrationCurve {
        timeline: points,
        peak,
        resolution,
        recovery,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use threadsmith_core::{EmotionalProfile, RecoverySpeed, VocabularyProfile};

    fn persona(recovery: RecoverySpeed, frustration_affinity: f32) -> Persona {
        let mut intensities = HashMap::new();
        intensities.insert(Emotion::Frustration, frustration_affinity);
        Persona {
            id: "t".into(),
            name: "t".into(),
            role: "dev".into(),
            vocabulary: VocabularyProfile::default(),
            style: "terse".into(),
            interests: vec![],
            emotions: Some(EmotionalProfile {
                intensities,
                recovery,
            }),
            humor: None,
        }
    }

    #[test]
    fn test_peak_is_max_and_resolution_is_last() {
        for arc in ArcType::ALL {
            let curve =
                generate_frustration_curve(&persona(RecoverySpeed::Moderate, 1.0), "", arc);
            for p in &curve.timeline {
                assert!(p.level <= curve.peak.level);
            }
            assert_eq!(
                curve.resolution.minutes,
                curve.timeline.last().unwrap().minutes
            );
        }
    }

    #[test]
    fn test_quick_recovery_resolves_lower_than_slow() {
        for arc in ArcType::ALL {
            let quick = generate_frustration_curve(&persona(RecoverySpeed::Quick, 1.0), "", arc);
            let slow = generate_frustration_curve(&persona(RecoverySpeed::Slow, 1.0), "", arc);
            assert!(
                quick.resolution.level <= slow.resolution.level,
                "arc {arc}: quick {} > slow {}",
                quick.resolution.level,
                slow.resolution.level
            );
        }
    }

    #[test]
    fn test_levels_clamped_for_intense_persona() {
        let curve = generate_frustration_curve(
            &persona(RecoverySpeed::Slow, 10.0),
            "",
            ArcType::WarStory,
        );
        for p in &curve.timeline {
            assert!(p.level >= 0.0 && p.level <= 1.0);
        }
    }

    #[test]
    fn test_problem_context_on_first_checkpoint() {
        let curve = generate_frustration_curve(
            &persona(RecoverySpeed::Moderate, 1.0),
            "ci queue backed up for hours",
            ArcType::ProblemSolver,
        );
        assert!(curve.timeline[0].triggers.iter().any(|t| t.contains("ci queue")));
        assert_eq!(curve.timeline[1].triggers.len(), 1);
    }

    #[test]
    fn test_decay_applies_over_time() {
        // Same base level at t=0 vs deep decay at late checkpoints: the last
        // point must sit well below an undecayed copy of its base.
        let curve =
            generate_frustration_curve(&persona(RecoverySpeed::Quick, 1.0), "", ArcType::Discovery);
        let last = curve.timeline.last().unwrap();
        // base 0.15 at 180 min with 0.95^(18) ≈ 0.40 → ~0.06
        assert!(last.level < 0.15);
    }
}
