//! Conversation assembly.
//!
//! Picks a cast of personas for a subreddit, runs the emotional engines,
//! and drives the multi-pass controller once per slot — all top-level
//! comments concurrently, then all replies concurrently once the comments
//! they answer exist. The first-comment product-mention override happens
//! here, before any prompt is composed.

use crate::llm::TextGenerator;
use crate::multipass::{ContentKind, MultiPassController};
use crate::prompts::{self, PromptContext};
use crate::schedule::UsageTracker;
use futures_util::future::join_all;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use threadsmith_core::{
    ArcTemplate, ArcType, CompanyContext, ConversationThread, Persona, PipelineConfig,
    ReferenceData, SubredditContext, ThreadComment, ThreadPost, ThreadReply, ThreadsmithError,
};
use threadsmith_emotion::{
    generate_emotional_arc, generate_frustration_curve, identify_humor_opportunities,
    identify_vulnerability_moments,
};
use uuid::Uuid;

/// One thread to build.
#[derive(Debug, Clone)]
pub struct ThreadRequest {
    pub subreddit: String,
    pub arc: ArcType,
    /// The user problem the thread is built around.
    pub problem: String,
}

pub struct ConversationDesigner {
    generator: Arc<dyn TextGenerator>,
    reference: ReferenceData,
    config: PipelineConfig,
}

/// Formality-distance weight in persona selection.
const FORMALITY_WEIGHT: f32 = 5.0;
/// Points per shared interest/topic, and the cap on them.
const INTEREST_WEIGHT: f32 = 2.0;
const INTEREST_CAP: f32 = 6.0;

/// Rank a persona for a community: formality fit, interest overlap, and a
/// diversity penalty for personas already used this run.
pub fn score_persona_for_subreddit(
    persona: &Persona,
    subreddit: &SubredditContext,
    usage: &UsageTracker,
) -> f32 {
    let formality_fit =
        (1.0 - (persona.vocabulary.formality - subreddit.formality).abs()) * FORMALITY_WEIGHT;

    let interest_overlap = persona
        .interests
        .iter()
        .filter(|interest| {
            subreddit
                .common_topics
                .iter()
                .any(|topic| topic.eq_ignore_ascii_case(interest))
        })
        .count() as f32
        * INTEREST_WEIGHT;

    let usage_penalty = usage.persona_uses(&persona.id) as f32
        + 0.5 * usage.pair_uses(&persona.id, &subreddit.name) as f32;

    formality_fit + interest_overlap.min(INTEREST_CAP) - usage_penalty
}

impl ConversationDesigner {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        reference: ReferenceData,
        config: PipelineConfig,
    ) -> Self {
        Self {
            generator,
            reference,
            config,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Rank the roster for this subreddit and deal out OP plus `comments`
    /// commenters. Commenters cycle through the non-OP ranking when the
    /// roster is smaller than the cast.
    fn select_cast<'a>(
        &'a self,
        subreddit: &SubredditContext,
        comments: usize,
        usage: &UsageTracker,
    ) -> Result<(&'a Persona, Vec<&'a Persona>), ThreadsmithError> {
        if self.reference.personas.is_empty() {
            return Err(ThreadsmithError::EmptyRoster);
        }

        let mut ranked: Vec<&Persona> = self.reference.personas.iter().collect();
        ranked.sort_by(|a, b| {
            let sa = score_persona_for_subreddit(a, subreddit, usage);
            let sb = score_persona_for_subreddit(b, subreddit, usage);
            sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
        });

        let op = ranked[0];
        let others: Vec<&Persona> = if ranked.len() > 1 {
            ranked[1..].to_vec()
        } else {
            // Single-persona roster: the OP talks to themselves. Degenerate
            // but the scorer will flag the missing diversity.
            vec![op]
        };
        let commenters = (0..comments).map(|i| others[i % others.len()]).collect();
        Ok((op, commenters))
    }

    /// Build one complete thread.
    ///
    /// Configuration errors (unknown subreddit, arc without a template,
    /// empty roster) fail fast; generation failures never do — degraded
    /// slots arrive as fallback text instead.
    pub async fn design_thread(
        &self,
        request: &ThreadRequest,
        company: Option<&CompanyContext>,
        usage: &mut UsageTracker,
        rng: &mut StdRng,
    ) -> Result<ConversationThread, ThreadsmithError> {
        let subreddit = self.reference.subreddit(&request.subreddit)?.clone();
        let template = ArcTemplate::builtin(request.arc)?;

        let (op, commenters) = self.select_cast(&subreddit, template.comments.len(), usage)?;

        let arc = generate_emotional_arc(op, request.arc, &request.problem);
        let curve = generate_frustration_curve(op, &request.problem, request.arc);
        let controller = MultiPassController::new(
            self.generator.clone(),
            self.config.generation.clone(),
        );

        // Product-mention flags come from the template, but the first
        // comment is never the first product mention, whatever the
        // template says.
        let mut mention_flags: Vec<bool> = template
            .comments
            .iter()
            .map(|slot| slot.product_mention && company.is_some())
            .collect();
        if let Some(first) = mention_flags.first_mut() {
            *first = false;
        }

        // Sample every posting delay up front; the rng doesn't cross await
        // points.
        let comment_offsets: Vec<u32> = template
            .comments
            .iter()
            .map(|slot| rng.gen_range(slot.timing_minutes.0..=slot.timing_minutes.1))
            .collect();
        let reply_offsets: Vec<u32> = template
            .replies
            .iter()
            .map(|r| rng.gen_range(r.slot.timing_minutes.0..=r.slot.timing_minutes.1))
            .collect();

        // Post first — everything downstream quotes it.
        let post_ctx = PromptContext {
            persona: op,
            subreddit: &subreddit,
            company,
            problem: &request.problem,
        };
        let post_mention = template.post.product_mention && company.is_some();
        let mut post_slot = template.post.clone();
        post_slot.product_mention = post_mention;
        let post_prompt = prompts::post_prompt(&post_ctx, &post_slot, &arc.start, curve.peak.level);
        let post_result = controller
            .generate(ContentKind::Post, &post_prompt, op)
            .await;
        let (title, body) = split_post(&post_result.final_content);

        let post = ThreadPost {
            title,
            body,
            author: op.id.clone(),
            product_mention: post_mention,
        };
        let post_text = format!("{}\n\n{}", post.title, post.body);

        // All top-level comments concurrently.
        let comment_futures = template.comments.iter().enumerate().map(|(i, slot)| {
            let author = commenters[i];
            let mut slot = slot.clone();
            slot.product_mention = mention_flags[i];
            let stage = arc.progression[i].clone();
            let humor = identify_humor_opportunities(&arc, author, &subreddit)
                .into_iter()
                .find(|h| h.position == i);
            let vulnerability = identify_vulnerability_moments(&arc, author, &subreddit)
                .into_iter()
                .find(|v| v.position == i);
            let ctx = PromptContext {
                persona: author,
                subreddit: &subreddit,
                company,
                problem: &request.problem,
            };
            let prompt = prompts::comment_prompt(
                &ctx,
                &slot,
                &stage,
                &post_text,
                humor.as_ref(),
                vulnerability.as_ref(),
            );
            let controller = &controller;
            async move {
                controller
                    .generate(ContentKind::Comment, &prompt, author)
                    .await
            }
        });
        let comment_results = join_all(comment_futures).await;

        let comments: Vec<ThreadComment> = comment_results
            .iter()
            .enumerate()
            .map(|(i, result)| ThreadComment {
                id: Uuid::new_v4(),
                author: commenters[i].id.clone(),
                body: result.final_content.clone(),
                product_mention: mention_flags[i],
                offset_minutes: comment_offsets[i],
            })
            .collect();

        // Replies start only after every parent comment exists.
        let reply_futures = template.replies.iter().enumerate().map(|(i, reply)| {
            let parent = &comments[reply.parent_index];
            let mut slot = reply.slot.clone();
            slot.product_mention = slot.product_mention && company.is_some();
            let ctx = PromptContext {
                persona: op,
                subreddit: &subreddit,
                company,
                problem: &request.problem,
            };
            let prompt = prompts::reply_prompt(&ctx, &slot, &arc.end, &parent.body);
            let controller = &controller;
            async move {
                let result = controller.generate(ContentKind::Reply, &prompt, op).await;
                (i, result)
            }
        });
        let reply_results = join_all(reply_futures).await;

        let replies: Vec<ThreadReply> = reply_results
            .into_iter()
            .map(|(i, result)| {
                let template_reply = &template.replies[i];
                ThreadReply {
                    id: Uuid::new_v4(),
                    parent_comment_id: comments[template_reply.parent_index].id,
                    author: op.id.clone(),
                    body: result.final_content,
                    product_mention: template_reply.slot.product_mention && company.is_some(),
                    offset_minutes: reply_offsets[i],
                }
            })
            .collect();

        let mut thread = ConversationThread {
            id: Uuid::new_v4(),
            post,
            top_level_comments: comments,
            replies,
            arc: request.arc,
            subreddit: subreddit.name.clone(),
            quality: None,
        };
        thread.validate()?;

        let quality = threadsmith_scoring::predict_quality(
            &thread,
            &subreddit,
            op.vocabulary.formality,
            company,
        );
        tracing::info!(
            thread = %thread.id,
            subreddit = %thread.subreddit,
            arc = %thread.arc,
            overall = quality.overall,
            "thread assembled"
        );
        thread.quality = Some(quality);

        usage.record(&thread);
        Ok(thread)
    }
}

/// First line is the title; the rest is the body. Single-line content
/// becomes a title with an empty body.
fn split_post(content: &str) -> (String, String) {
    match content.split_once('\n') {
        Some((title, body)) => (title.trim().to_string(), body.trim().to_string()),
        None => (content.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockGenerator;
    use threadsmith_core::rng;

    fn designer(generator: MockGenerator) -> ConversationDesigner {
        ConversationDesigner::new(
            Arc::new(generator),
            ReferenceData::builtin(),
            PipelineConfig::default(),
        )
    }

    fn request(arc: ArcType) -> ThreadRequest {
        ThreadRequest {
            subreddit: "sysadmin".into(),
            arc,
            problem: "backup jobs failing silently every few days".into(),
        }
    }

    fn company() -> CompanyContext {
        CompanyContext {
            name: "Logpile".into(),
            product_description: "log aggregation".into(),
            value_propositions: vec![],
            keywords: vec!["backups".into()],
            activities: vec![],
        }
    }

    #[tokio::test]
    async fn test_first_comment_never_mentions_product() {
        for arc in [ArcType::Discovery, ArcType::Comparison, ArcType::ProblemSolver] {
            let d = designer(MockGenerator::always("title\n\nsome decent body text"));
            let mut usage = UsageTracker::default();
            let mut r = rng::seeded(7);
            let thread = d
                .design_thread(&request(arc), Some(&company()), &mut usage, &mut r)
                .await
                .unwrap();
            assert!(!thread.top_level_comments[0].product_mention);
        }
    }

    #[tokio::test]
    async fn test_thread_shape_matches_template() {
        let d = designer(MockGenerator::always("title line\nbody text"));
        let mut usage = UsageTracker::default();
        let mut r = rng::seeded(1);
        let thread = d
            .design_thread(&request(ArcType::Discovery), None, &mut usage, &mut r)
            .await
            .unwrap();
        let template = ArcTemplate::builtin(ArcType::Discovery).unwrap();
        assert_eq!(thread.top_level_comments.len(), template.comments.len());
        assert_eq!(thread.replies.len(), template.replies.len());
        assert!(thread.validate().is_ok());
        assert!(thread.quality.is_some());
    }

    #[tokio::test]
    async fn test_unknown_subreddit_fails_fast() {
        let d = designer(MockGenerator::always("x"));
        let mut usage = UsageTracker::default();
        let mut r = rng::seeded(1);
        let req = ThreadRequest {
            subreddit: "does_not_exist".into(),
            arc: ArcType::Discovery,
            problem: "p".into(),
        };
        assert!(matches!(
            d.design_thread(&req, None, &mut usage, &mut r).await,
            Err(ThreadsmithError::UnknownSubreddit(_))
        ));
    }

    #[tokio::test]
    async fn test_arc_without_template_fails_fast() {
        let d = designer(MockGenerator::always("x"));
        let mut usage = UsageTracker::default();
        let mut r = rng::seeded(1);
        assert!(matches!(
            d.design_thread(&request(ArcType::WarStory), None, &mut usage, &mut r)
                .await,
            Err(ThreadsmithError::MissingArcTemplate(_))
        ));
    }

    #[tokio::test]
    async fn test_silent_generator_still_produces_thread() {
        let d = designer(MockGenerator::silent());
        let mut usage = UsageTracker::default();
        let mut r = rng::seeded(3);
        let thread = d
            .design_thread(&request(ArcType::Discovery), Some(&company()), &mut usage, &mut r)
            .await
            .unwrap();
        // Fallback content everywhere, but the thread is structurally whole.
        assert!(thread.validate().is_ok());
        assert!(!thread.post.title.is_empty());
        for c in &thread.top_level_comments {
            assert!(!c.body.is_empty());
        }
    }

    #[tokio::test]
    async fn test_usage_recorded() {
        let d = designer(MockGenerator::always("t\nb"));
        let mut usage = UsageTracker::default();
        let mut r = rng::seeded(1);
        let thread = d
            .design_thread(&request(ArcType::Discovery), None, &mut usage, &mut r)
            .await
            .unwrap();
        assert!(usage.persona_uses(&thread.post.author) > 0);
    }

    #[tokio::test]
    async fn test_offsets_within_template_ranges() {
        let d = designer(MockGenerator::always("t\nb"));
        let mut usage = UsageTracker::default();
        let mut r = rng::seeded(11);
        let thread = d
            .design_thread(&request(ArcType::ProblemSolver), None, &mut usage, &mut r)
            .await
            .unwrap();
        let template = ArcTemplate::builtin(ArcType::ProblemSolver).unwrap();
        for (c, slot) in thread.top_level_comments.iter().zip(&template.comments) {
            assert!(c.offset_minutes >= slot.timing_minutes.0);
            assert!(c.offset_minutes <= slot.timing_minutes.1);
        }
    }

    #[test]
    fn test_arc_progression_matches_template_slots() {
        // The emotion engine's stage tables and the designer's conversation
        // templates must agree on slot counts for every canonical arc.
        let p = ReferenceData::builtin().personas[0].clone();
        for arc in [ArcType::Discovery, ArcType::Comparison, ArcType::ProblemSolver] {
            let template = ArcTemplate::builtin(arc).unwrap();
            let emotional = generate_emotional_arc(&p, arc, "problem");
            assert_eq!(emotional.progression.len(), template.comments.len());
        }
    }

    #[test]
    fn test_persona_formality_ranking() {
        // Two personas, identical interests, formality 0.2 vs 0.9, target 0.3.
        let usage = UsageTracker::default();
        let data = ReferenceData::builtin();
        let sub = {
            let mut s = data.subreddits[0].clone();
            s.formality = 0.3;
            s.common_topics = vec![];
            s
        };
        let mut casual = data.personas[0].clone();
        casual.vocabulary.formality = 0.2;
        casual.interests = vec!["rust".into()];
        let mut formal = casual.clone();
        formal.id = "formal".into();
        formal.vocabulary.formality = 0.9;

        let s_casual = score_persona_for_subreddit(&casual, &sub, &usage);
        let s_formal = score_persona_for_subreddit(&formal, &sub, &usage);
        assert!(s_casual > s_formal);
    }

    #[test]
    fn test_usage_penalty_rotates_cast() {
        let data = ReferenceData::builtin();
        let sub = &data.subreddits[0];
        let persona = &data.personas[0];
        let fresh = UsageTracker::default();
        let mut worn = UsageTracker::default();
        for _ in 0..3 {
            worn.record_persona(&persona.id, &sub.name);
        }
        assert!(
            score_persona_for_subreddit(persona, sub, &worn)
                < score_persona_for_subreddit(persona, sub, &fresh)
        );
    }
}
