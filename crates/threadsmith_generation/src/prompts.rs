//! Prompt composition.
//!
//! Pure functions from (persona, community, emotional context) to the
//! instruction strings sent to the text-generation service. No I/O, no
//! randomness — the same inputs always compose the same prompt.

use threadsmith_core::{
    CompanyContext, EmotionalState, Persona, SlotTemplate, SubredditContext,
};
use threadsmith_emotion::{HumorOpportunity, VulnerabilityMoment};

/// Everything a single slot prompt draws on.
pub struct PromptContext<'a> {
    pub persona: &'a Persona,
    pub subreddit: &'a SubredditContext,
    pub company: Option<&'a CompanyContext>,
    /// The user problem this thread is built around.
    pub problem: &'a str,
}

fn formality_direction(formality: f32) -> &'static str {
    if formality < 0.3 {
        "Very casual. Lowercase is fine, fragments are fine, no polish."
    } else if formality < 0.6 {
        "Conversational. Write like you'd type in a group chat with coworkers."
    } else {
        "Measured and precise, but still a person — not documentation."
    }
}

/// The voice block shared by every slot prompt.
fn voice_block(persona: &Persona) -> String {
    let mut lines = vec![format!(
        "You are writing as {}, a {}. Communication style: {}.",
        persona.name, persona.role, persona.style
    )];
    lines.push(formality_direction(persona.vocabulary.formality).to_string());
    if !persona.vocabulary.characteristic_phrases.is_empty() {
        lines.push(format!(
            "Phrases that sound like you (use sparingly, at most one): {}.",
            persona.vocabulary.characteristic_phrases.join(", ")
        ));
    }
    if !persona.vocabulary.avoided_phrases.is_empty() {
        lines.push(format!(
            "Never use: {}.",
            persona.vocabulary.avoided_phrases.join(", ")
        ));
    }
    lines.join("\n")
}

fn community_block(subreddit: &SubredditContext) -> String {
    let mut lines = vec![format!(
        "This is r/{} — {} culture.",
        subreddit.name, subreddit.culture
    )];
    if !subreddit.accepted_language.is_empty() {
        lines.push(format!(
            "Local vocabulary: {}.",
            subreddit.accepted_language.join(", ")
        ));
    }
    if !subreddit.avoided_language.is_empty() {
        lines.push(format!(
            "Words that get you downvoted here: {}.",
            subreddit.avoided_language.join(", ")
        ));
    }
    lines.join("\n")
}

fn emotion_block(stage: &EmotionalState) -> String {
    let intensity_word = if stage.intensity > 0.7 {
        "strongly"
    } else if stage.intensity > 0.4 {
        "noticeably"
    } else {
        "mildly"
    };
    format!(
        "Emotional register: {} {}. Trigger: {}. Let it color word choice, don't announce it.",
        intensity_word,
        stage.emotion.describe(),
        stage.triggers.first().map(String::as_str).unwrap_or("n/a")
    )
}

fn product_block(company: &CompanyContext, allowed: bool) -> String {
    if allowed {
        format!(
            "You can mention {} ({}) because it genuinely fits your experience — one mention, \
             with a real caveat or limitation included. Never superlatives, never a pitch.",
            company.name, company.product_description
        )
    } else {
        format!(
            "Do NOT mention {} or any specific commercial product in this piece.",
            company.name
        )
    }
}

/// Compose the post prompt for a thread.
pub fn post_prompt(
    ctx: &PromptContext<'_>,
    slot: &SlotTemplate,
    stage: &EmotionalState,
    frustration_level: f32,
) -> String {
    let mut sections = vec![
        voice_block(ctx.persona),
        community_block(ctx.subreddit),
        emotion_block(stage),
    ];
    if frustration_level > 0.6 {
        sections.push(
            "You've been at this long enough that the irritation shows through.".to_string(),
        );
    }
    if let Some(company) = ctx.company {
        sections.push(product_block(company, slot.product_mention));
    }
    sections.push(format!(
        "Write a Reddit post about: {}.\nTone: {}. Goal of the post: {}.\n\
         Include at least one concrete number or timeframe from your actual situation.\n\
         First line is the post title, the rest is the body. Plain text only.",
        ctx.problem, slot.tone, slot.purpose
    ));
    sections.join("\n\n")
}

/// Compose a top-level comment prompt.
#[allow(clippy::too_many_arguments)]
pub fn comment_prompt(
    ctx: &PromptContext<'_>,
    slot: &SlotTemplate,
    stage: &EmotionalState,
    post_text: &str,
    humor: Option<&HumorOpportunity>,
    vulnerability: Option<&VulnerabilityMoment>,
) -> String {
    let mut sections = vec![
        voice_block(ctx.persona),
        community_block(ctx.subreddit),
        emotion_block(stage),
    ];
    if let Some(h) = humor {
        sections.push(format!(
            "There's room for one {} here — only if it lands naturally. Appropriateness {:.1}: \
             below 0.5, skip it.",
            match h.beat {
                threadsmith_emotion::HumorBeat::DryUnderstatement => "dry understatement",
                threadsmith_emotion::HumorBeat::SelfDeprecatingAside => "self-deprecating aside",
                threadsmith_emotion::HumorBeat::ObservationalRiff => "observational riff",
                threadsmith_emotion::HumorBeat::PlayfulExaggeration => "playful exaggeration",
            },
            h.appropriateness
        ));
    }
    if let Some(v) = vulnerability {
        sections.push(format!(
            "It fits to admit {} — briefly, without fishing for sympathy.",
            match v.kind {
                threadsmith_emotion::VulnerabilityKind::StruggleAdmission =>
                    "you're genuinely stuck on part of this",
                threadsmith_emotion::VulnerabilityKind::PastFailure =>
                    "you got this wrong yourself once",
                threadsmith_emotion::VulnerabilityKind::Uncertainty =>
                    "you're not certain your take is right",
            }
        ));
    }
    if let Some(company) = ctx.company {
        sections.push(product_block(company, slot.product_mention));
    }
    sections.push(format!(
        "You're replying to this post:\n---\n{}\n---\n\
         Tone: {}. Your job in the thread: {}.\n\
         Write the comment. Plain text, no markdown formatting, 1-4 sentences unless the \
         story needs more.",
        post_text, slot.tone, slot.purpose
    ));
    sections.join("\n\n")
}

/// Compose a reply-to-comment prompt.
pub fn reply_prompt(
    ctx: &PromptContext<'_>,
    slot: &SlotTemplate,
    stage: &EmotionalState,
    parent_comment: &str,
) -> String {
    let mut sections = vec![voice_block(ctx.persona), emotion_block(stage)];
    if let Some(company) = ctx.company {
        sections.push(product_block(company, slot.product_mention));
    }
    sections.push(format!(
        "You're replying to this comment on your own post:\n---\n{}\n---\n\
         Tone: {}. Purpose: {}.\n\
         Keep it short — one to three sentences, like a real follow-up.",
        parent_comment, slot.tone, slot.purpose
    ));
    sections.join("\n\n")
}

/// Pass 2: humanizing rewrite of a raw draft.
pub fn authenticity_prompt(draft: &str, persona: &Persona) -> String {
    format!(
        "Rewrite the text below so it reads like something {} actually typed on Reddit.\n\
         - Use contractions everywhere they'd naturally occur.\n\
         - Leave one small imperfection: a lowercase start, a trailing thought, a minor typo.\n\
         - Cut anything that sounds like an assistant: no 'great question', no 'I'd recommend', \
         no numbered lists.\n\
         - Shorter is better. Keep the meaning, drop the polish.\n\
         Output only the rewritten text.\n\n---\n{}",
        persona.name, draft
    )
}

/// Pass 3: strict self-critique returning a fixed key-value block.
pub fn validation_prompt(content: &str) -> String {
    format!(
        "You are screening Reddit content for telltale signs of machine generation. \
         Evaluate the text below and answer in EXACTLY this format, one field per line:\n\
         PASS: true or false\n\
         SCORE: 0-100\n\
         AI_PATTERNS: comma-separated phrases you found, or none\n\
         HUMAN_MARKERS: comma-separated authentic touches, or none\n\
         ISSUES: comma-separated problems, or none\n\n\
         PASS is true only if SCORE is 70 or higher.\n\n---\n{}",
        content
    )
}
