//! Weekly planning and cast-usage tracking.
//!
//! The tracker is local to a single planning run and the loop that mutates
//! it is strictly sequential — no locking. Thread generations are
//! deliberately serialized with a fixed pacing delay between them to stay
//! inside the text service's rate limits.

use crate::designer::{ConversationDesigner, ThreadRequest};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashMap;
use threadsmith_core::{
    ArcType, CompanyContext, ConversationThread, ScheduleConfig, ScheduledConversation,
    ThreadsmithError,
};

/// Frequency maps for round-robin diversity across a week of threads.
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    persona_counts: HashMap<String, u32>,
    subreddit_counts: HashMap<String, u32>,
    pair_counts: HashMap<(String, String), u32>,
}

impl UsageTracker {
    pub fn persona_uses(&self, persona_id: &str) -> u32 {
        self.persona_counts.get(persona_id).copied().unwrap_or(0)
    }

    pub fn subreddit_uses(&self, subreddit: &str) -> u32 {
        self.subreddit_counts.get(subreddit).copied().unwrap_or(0)
    }

    pub fn pair_uses(&self, persona_id: &str, subreddit: &str) -> u32 {
        self.pair_counts
            .get(&(persona_id.to_string(), subreddit.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn record_persona(&mut self, persona_id: &str, subreddit: &str) {
        *self
            .persona_counts
            .entry(persona_id.to_string())
            .or_default() += 1;
        *self
            .pair_counts
            .entry((persona_id.to_string(), subreddit.to_string()))
            .or_default() += 1;
    }

    /// Record every persona that appears in a finished thread.
    pub fn record(&mut self, thread: &ConversationThread) {
        *self
            .subreddit_counts
            .entry(thread.subreddit.clone())
            .or_default() += 1;

        let mut seen = vec![thread.post.author.clone()];
        for comment in &thread.top_level_comments {
            if !seen.contains(&comment.author) {
                seen.push(comment.author.clone());
            }
        }
        for persona_id in seen {
            self.record_persona(&persona_id, &thread.subreddit);
        }
    }
}

/// What a week's worth of threads rotates through.
#[derive(Debug, Clone)]
pub struct CampaignPlan {
    pub company: Option<CompanyContext>,
    pub problems: Vec<String>,
    pub subreddits: Vec<String>,
    pub arcs: Vec<ArcType>,
}

impl CampaignPlan {
    /// Explicit problems win; a company's precomputed pain-point activities
    /// are the fallback pool.
    fn problem_pool(&self) -> Vec<String> {
        if !self.problems.is_empty() {
            return self.problems.clone();
        }
        self.company
            .as_ref()
            .map(|c| c.activities.clone())
            .unwrap_or_default()
    }

    fn validate(&self) -> Result<(), ThreadsmithError> {
        if self.problem_pool().is_empty() || self.subreddits.is_empty() || self.arcs.is_empty() {
            return Err(ThreadsmithError::Config(
                "campaign plan needs at least one problem (or company activity), subreddit, and arc"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

pub struct WeeklyPlanner {
    designer: ConversationDesigner,
    config: ScheduleConfig,
}

impl WeeklyPlanner {
    pub fn new(designer: ConversationDesigner, config: ScheduleConfig) -> Self {
        Self { designer, config }
    }

    /// Build a week of scheduled conversations starting at `start`.
    ///
    /// Threads are generated one at a time with a pacing delay between
    /// them. A thread scoring below the quality threshold is regenerated a
    /// bounded number of times; the best-scoring candidate is kept either
    /// way — the threshold filters, it doesn't guarantee.
    pub async fn build_week(
        &self,
        plan: &CampaignPlan,
        start: DateTime<Utc>,
        rng: &mut StdRng,
    ) -> Result<Vec<ScheduledConversation>, ThreadsmithError> {
        plan.validate()?;
        let problems = plan.problem_pool();

        let n = self.config.threads_per_week.max(1);
        let spacing_hours = (24 * 7) as f64 / n as f64;
        let mut usage = UsageTracker::default();
        let mut scheduled = Vec::with_capacity(n);

        for i in 0..n {
            let request = ThreadRequest {
                subreddit: plan.subreddits[i % plan.subreddits.len()].clone(),
                arc: plan.arcs[i % plan.arcs.len()],
                problem: problems[i % problems.len()].clone(),
            };

            let thread = self
                .generate_with_threshold(&request, plan.company.as_ref(), &mut usage, rng)
                .await?;

            // Spread across the week, jittered within a few hours so the
            // cadence doesn't look mechanical.
            let jitter_minutes = rng.gen_range(0..180) as i64;
            let scheduled_time = start
                + ChronoDuration::minutes((spacing_hours * 60.0) as i64 * i as i64)
                + ChronoDuration::minutes(jitter_minutes);

            scheduled.push(build_schedule_record(thread, scheduled_time));

            if i + 1 < n {
                tokio::time::sleep(std::time::Duration::from_millis(self.config.pacing_delay_ms))
                    .await;
            }
        }

        Ok(scheduled)
    }

    /// Generate one thread, retrying up to `regen_attempts` extra times
    /// while the score sits below the threshold. Keeps the best seen.
    async fn generate_with_threshold(
        &self,
        request: &ThreadRequest,
        company: Option<&CompanyContext>,
        usage: &mut UsageTracker,
        rng: &mut StdRng,
    ) -> Result<ConversationThread, ThreadsmithError> {
        let mut best: Option<ConversationThread> = None;

        for attempt in 0..=self.config.regen_attempts {
            let thread = self.designer.design_thread(request, company, usage, rng).await?;
            let score = thread.quality.as_ref().map(|q| q.overall).unwrap_or(0.0);

            if score >= self.config.quality_threshold {
                return Ok(thread);
            }
            tracing::info!(
                attempt,
                score,
                threshold = self.config.quality_threshold,
                "thread below quality threshold"
            );

            let best_score = best
                .as_ref()
                .and_then(|t| t.quality.as_ref().map(|q| q.overall))
                .unwrap_or(f32::MIN);
            if score > best_score {
                best = Some(thread);
            }
        }

        // regen_attempts + 1 >= 1 iterations, so best is always set here.
        Ok(best.expect("at least one generation attempt ran"))
    }
}

/// Turn slot offsets into absolute timestamps. Comment offsets chain off
/// the previous comment; reply offsets chain off their parent comment.
fn build_schedule_record(
    thread: ConversationThread,
    scheduled_time: DateTime<Utc>,
) -> ScheduledConversation {
    let mut comment_timings = Vec::with_capacity(thread.top_level_comments.len());
    let mut cursor = scheduled_time;
    for comment in &thread.top_level_comments {
        cursor += ChronoDuration::minutes(comment.offset_minutes as i64);
        comment_timings.push(cursor);
    }

    let reply_timings = thread
        .replies
        .iter()
        .map(|reply| {
            let parent_time = thread
                .top_level_comments
                .iter()
                .position(|c| c.id == reply.parent_comment_id)
                .and_then(|idx| comment_timings.get(idx).copied())
                .unwrap_or(scheduled_time);
            parent_time + ChronoDuration::minutes(reply.offset_minutes as i64)
        })
        .collect();

    ScheduledConversation {
        conversation: thread,
        scheduled_time,
        comment_timings,
        reply_timings,
    }
}
