//! Engagement design: does the thread invite participation and does the OP
//! behave like someone who cares about the answers? Point budget: 15
//! (5 question + 5 OP follow-ups + 3 commenter diversity + 2 relatable
//! emotion).

use crate::patterns;
use crate::DimensionResult;
use threadsmith_core::{ConversationThread, Issue, IssueKind, Severity};

pub(crate) fn score(thread: &ConversationThread) -> DimensionResult {
    let mut result = DimensionResult::default();
    let post_text = format!("{} {}", thread.post.title, thread.post.body);

    // An actual question pulls answers.
    if post_text.contains('?') {
        result.points += 5.0;
    } else {
        result.issues.push(Issue::new(
            IssueKind::NoQuestion,
            Severity::Low,
            "post doesn't ask anything",
        ));
    }

    // An OP who disappears after posting reads as a drive-by.
    match thread.op_follow_ups() {
        0 => {
            result.issues.push(Issue::new(
                IssueKind::NoOpFollowUp,
                Severity::Medium,
                "OP never replies to their own thread",
            ));
        }
        1 => result.points += 3.0,
        _ => {
            result.points += 5.0;
            result
                .strengths
                .push("OP stays engaged in their own thread".to_string());
        }
    }

    // Multiple distinct voices.
    let commenters = thread.distinct_commenters();
    result.points += match commenters {
        0 => 0.0,
        1 => 1.0,
        2 => 2.0,
        _ => 3.0,
    };
    if commenters < 2 {
        result.issues.push(Issue::new(
            IssueKind::LowCommenterDiversity,
            Severity::Medium,
            format!("only {} distinct commenter(s)", commenters),
        ));
    }

    // Relatable emotion in the post.
    if patterns::EMOTION_WORDS.is_match(&post_text) {
        result.points += 2.0;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{thread_with_comments, with_op_replies};

    #[test]
    fn test_full_engagement() {
        let mut thread = thread_with_comments(
            "why do backups keep failing?",
            "honestly so frustrated with this. anyone seen it?",
            &["same", "check cron", "logs?"],
        );
        thread = with_op_replies(thread, 2);
        let r = score(&thread);
        assert_eq!(r.points, 15.0);
    }

    #[test]
    fn test_no_question_flagged() {
        let thread = thread_with_comments("statement title", "just venting here", &["ok"]);
        let r = score(&thread);
        assert!(r.issues.iter().any(|i| i.kind == IssueKind::NoQuestion));
    }

    #[test]
    fn test_op_follow_up_tiers() {
        let base = thread_with_comments("t?", "b", &["a", "b", "c"]);
        let none = score(&base);
        assert!(none.issues.iter().any(|i| i.kind == IssueKind::NoOpFollowUp));

        let one = score(&with_op_replies(base.clone(), 1));
        let two = score(&with_op_replies(base, 2));
        assert!(two.points > one.points);
        assert!(one.points > none.points);
    }

    #[test]
    fn test_single_commenter_flagged() {
        let mut thread = thread_with_comments("t?", "b", &["a", "b"]);
        for c in &mut thread.top_level_comments {
            c.author = "same_person".into();
        }
        let r = score(&thread);
        assert!(r
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::LowCommenterDiversity));
    }
}
