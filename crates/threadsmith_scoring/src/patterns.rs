//! Pre-compiled pattern tables for the scorer.
//!
//! Compiled once, reused across all calls.

use regex::Regex;
use std::sync::LazyLock;

/// Telltale machine-generation phrases and structures.
pub static AI_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bfurthermore\b",
        r"(?i)\bmoreover\b",
        r"(?i)\badditionally\b",
        r"(?i)\bin conclusion\b",
        r"(?i)\bit'?s worth noting\b",
        r"(?i)\bgreat question\b",
        r"(?i)\bi hope this helps\b",
        r"(?i)\bhappy to help\b",
        r"(?i)\bleverag(e|ing)\b",
        r"(?i)\bseamless(ly)?\b",
        r"(?i)\bdelve\b",
        r"(?i)\brobust solution\b",
        r"(?i)\bas an ai\b",
        // Numbered lists read as documentation, not conversation.
        r"(?m)^\s*\d+\.\s",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// "Recommend me a tool" phrasing — the post reads as bait for shills.
pub static TOOL_FISHING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(looking for a|looking for recommendations|any recommendations|recommend me|can anyone recommend|what tool should|suggest a tool|best tool for)",
    )
    .expect("static pattern")
});

/// Promotional superlative phrasing near a product mention.
pub static SUPERLATIVES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(the best|you need|game.?changer|must.?have|hands down|life.?saver|absolutely amazing)")
        .expect("static pattern")
});

/// Phrases a human would normally contract.
pub static UNCONTRACTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(do not|does not|did not|cannot|will not|would not|should not|i am|it is|that is|there is|they are|we are)\b",
    )
    .expect("static pattern")
});

/// First-person voice.
pub static FIRST_PERSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(i|i'm|i've|i'd|my|mine|we|we're|our)\b").expect("static pattern")
});

/// Digits anywhere.
pub static NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("static pattern"));

/// Time references grounding the problem in a real timeline.
pub static TIME_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(yesterday|last (week|month|night|year)|this (week|morning)|(minute|hour|day|week|month|year)s?\b|since|ago)\b",
    )
    .expect("static pattern")
});

/// Quantifiers that make a complaint concrete.
pub static QUANTIFIERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(every|twice|three times|about|around|roughly|almost|at least|more than)\b")
        .expect("static pattern")
});

/// Casual register markers and deliberate imperfections.
pub static CASUAL_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(tbh|honestly|lol|yeah|gonna|wanna|kinda|sorta|idk|fwiw|ymmv|tbf|ngl)\b")
        .expect("static pattern")
});

/// Emotion words readers relate to.
pub static EMOTION_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(frustrat(ed|ing)|annoy(ed|ing)|struggling|tired of|driving me|fed up|relieved|finally|glad|burned out)\b",
    )
    .expect("static pattern")
});

/// Count how many distinct AI patterns match in a text.
pub fn ai_pattern_matches(text: &str) -> usize {
    AI_PATTERNS.iter().filter(|re| re.is_match(text)).count()
}
