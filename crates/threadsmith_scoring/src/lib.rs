//! Deterministic quality/authenticity scoring.
//!
//! `predict_quality` is a pure, total function: same thread in, same score
//! out, and every dimension has an explicit else-branch so degenerate
//! threads (empty post, zero comments) still score. Nothing here throws.

mod authenticity;
mod engagement;
pub mod patterns;
mod relevance;
mod specificity;
mod value_first;

use threadsmith_core::{
    CompanyContext, ConversationThread, DimensionScores, Grade, Issue, IssueKind, QualityScore,
    Severity, SubredditContext,
};

/// What each dimension scorer hands back.
#[derive(Debug, Default)]
pub(crate) struct DimensionResult {
    pub points: f32,
    pub issues: Vec<Issue>,
    pub strengths: Vec<String>,
}

/// Maximum number of suggestions surfaced.
const MAX_SUGGESTIONS: usize = 5;

/// Score a finished thread across the five weighted dimensions.
///
/// `op_formality` is the posting persona's formality, used for the
/// community-fit bonus. `company` enables product-mention checks; without
/// it, only the structural flags on the thread are consulted.
pub fn predict_quality(
    thread: &ConversationThread,
    subreddit: &SubredditContext,
    op_formality: f32,
    company: Option<&CompanyContext>,
) -> QualityScore {
    let relevance = relevance::score(thread, subreddit, op_formality, company);
    let specificity = specificity::score(thread);
    let authenticity = authenticity::score(thread);
    let value_first = value_first::score(thread, company);
    let engagement = engagement::score(thread);

    let dimensions = DimensionScores {
        relevance: relevance.points,
        specificity: specificity.points,
        authenticity: authenticity.points,
        value_first: value_first.points,
        engagement: engagement.points,
    };
    let overall = dimensions.sum();

    let mut issues = Vec::new();
    let mut strengths = Vec::new();
    for result in [relevance, specificity, authenticity, value_first, engagement] {
        issues.extend(result.issues);
        strengths.extend(result.strengths);
    }

    let suggestions = build_suggestions(&issues);
    let grade = Grade::from_score(overall);

    tracing::debug!(
        thread = %thread.id,
        overall,
        ?grade,
        issues = issues.len(),
        "thread scored"
    );

    QualityScore {
        overall,
        dimensions,
        grade,
        issues,
        strengths,
        suggestions,
    }
}

/// One actionable fix per issue kind.
fn rule_of_thumb(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::PromotionIntolerant => {
            "pick a community that tolerates product talk, or drop the mention entirely"
        }
        IssueKind::OffTopic => "anchor the post in one of the community's recurring topics",
        IssueKind::ToolFishing => {
            "describe the actual problem and what you already tried instead of asking for tools"
        }
        IssueKind::VaguePost => "add a number, a timeframe, or a frequency to the post",
        IssueKind::AiPatterns => "strip transition words, stock helpfulness, and numbered lists",
        IssueKind::UncontractedPhrasing => "contract everything a person would contract",
        IssueKind::OverlongComments => "cut every comment to the two sentences that matter",
        IssueKind::UniformStyle => "give each commenter different sentence lengths and vocabulary",
        IssueKind::PostProductMention => "move the product out of the post and into a late comment",
        IssueKind::FirstCommentProductMention => {
            "let the first comment empathize or diagnose — never pitch"
        }
        IssueKind::PromotionalSuperlatives => {
            "replace superlatives with one concrete benefit and one caveat"
        }
        IssueKind::NoQuestion => "end the post with a genuine question",
        IssueKind::NoOpFollowUp => "add OP replies reacting to at least two comments",
        IssueKind::LowCommenterDiversity => "bring in more distinct commenter personas",
    }
}

/// Severity-prioritized suggestions: the first critical, the first high,
/// then one rule of thumb per remaining issue kind, capped.
fn build_suggestions(issues: &[Issue]) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();
    let mut covered: Vec<IssueKind> = Vec::new();

    for severity in [Severity::Critical, Severity::High] {
        if let Some(issue) = issues.iter().find(|i| i.severity == severity) {
            suggestions.push(rule_of_thumb(issue.kind).to_string());
            covered.push(issue.kind);
        }
    }

    for issue in issues {
        if suggestions.len() >= MAX_SUGGESTIONS {
            break;
        }
        if !covered.contains(&issue.kind) {
            suggestions.push(rule_of_thumb(issue.kind).to_string());
            covered.push(issue.kind);
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

// ============================================================================
// Shared test fixtures
// ============================================================================


#[cfg(test)]
mod tests {
    use super::test_fixtures::*;
    use super::*;

    #[test]
    fn test_deterministic() {
        let thread = thread_with_post("why?", "I've restarted it 3 times since monday, frustrated honestly");
        let sub = subreddit(0.4);
        let co = company(&["backups"]);
        let a = predict_quality(&thread, &sub, 0.4, Some(&co));
        let b = predict_quality(&thread, &sub, 0.4, Some(&co));
        assert_eq!(a.overall, b.overall);
        assert_eq!(a.grade, b.grade);
        assert_eq!(a.issues.len(), b.issues.len());
        assert_eq!(a.suggestions, b.suggestions);
    }

    #[test]
    fn test_overall_is_dimension_sum() {
        let thread = thread_with_post("backups?", "nightly job died twice this week, i'm stuck");
        let score = predict_quality(&thread, &subreddit(0.4), 0.3, None);
        assert!((score.overall - score.dimensions.sum()).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_thread_still_scores() {
        let thread = thread_with_comments("", "", &[]);
        let score = predict_quality(&thread, &subreddit(0.9), 0.1, None);
        assert!(score.overall.is_finite());
        assert!(score.overall >= 0.0);
        assert_eq!(score.grade, Grade::Poor);
    }

    #[test]
    fn test_suggestions_capped_and_prioritized() {
        // A thread committing every sin at once.
        let mut thread = thread_with_comments(
            "Logpile is great",
            "Furthermore, you should purchase Logpile. It is robust. Do not hesitate. It is the best.",
            &[
                "Logpile is the best, you need it, hands down",
                "Moreover, I am certain it is a game changer. Additionally, leverage it.",
            ],
        );
        thread.top_level_comments[0].product_mention = true;
        let score = predict_quality(&thread, &subreddit(0.4), 0.4, Some(&company(&["logs"])));
        assert!(score.suggestions.len() <= 5);
        assert!(!score.suggestions.is_empty());
        // First suggestion comes from a critical issue.
        let first_critical = score
            .issues
            .iter()
            .find(|i| i.severity == Severity::Critical)
            .expect("this thread earns a critical issue");
        assert_eq!(score.suggestions[0], rule_of_thumb(first_critical.kind));
    }

    #[test]
    fn test_good_thread_grades_well() {
        let mut thread = thread_with_comments(
            "backups randomly failing, what am I missing?",
            "I've had our nightly backup job fail 3 times in the last two weeks, always around \
             2am, and honestly the logs show nothing. monitoring says the host is fine. kinda \
             out of ideas, frustrated — what would you check next?",
            &[
                "yeah we had this exact thing after a kernel patch, check dmesg around the window",
                "cron env bit me once. different PATH than your shell, fwiw",
                "is the storage target doing snapshots at 2am? ours was, took weeks to spot",
            ],
        );
        thread = with_op_replies(thread, 2);
        let score = predict_quality(&thread, &subreddit(0.4), 0.4, None);
        assert!(
            matches!(score.grade, Grade::Good | Grade::Excellent),
            "expected good thread, got {:?} at {}",
            score.grade,
            score.overall
        );
    }

    #[test]
    fn test_issue_kinds_deduplicated_in_suggestions() {
        let thread = thread_with_comments("no question here", "just words", &["ok"]);
        let score = predict_quality(&thread, &subreddit(0.4), 0.4, None);
        let mut seen = score.suggestions.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), score.suggestions.len());
    }
}
