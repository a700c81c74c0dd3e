//! Validator-response parsing.
//!
//! Pass 3 asks the model for a fixed key-value block. Models being models,
//! the block arrives with extra prose, missing lines, or creative casing —
//! so parsing is a total function: anything unparseable degrades to the
//! conservative default (score 50, not passed) instead of erroring.

use serde::Serialize;

/// Typed result of the validation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub passed: bool,
    /// Clamped to 0-100.
    pub score: u8,
    pub ai_patterns: Vec<String>,
    pub human_markers: Vec<String>,
    pub issues: Vec<String>,
}

impl Default for ValidationReport {
    /// Conservative fallback when the response can't be parsed.
    fn default() -> Self {
        Self {
            passed: false,
            score: 50,
            ai_patterns: Vec::new(),
            human_markers: Vec::new(),
            issues: Vec::new(),
        }
    }
}

/// Case-insensitive line-prefix lookup.
fn field<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        let line = line.trim();
        let lower = line.to_lowercase();
        if lower.starts_with(&prefix.to_lowercase()) {
            Some(line[prefix.len()..].trim())
        } else {
            None
        }
    })
}

fn parse_list(value: &str) -> Vec<String> {
    if value.eq_ignore_ascii_case("none") || value.is_empty() {
        return Vec::new();
    }
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("none"))
        .collect()
}

impl ValidationReport {
    /// Parse the validator's free-text response. Total: never errors.
    pub fn parse(text: &str) -> Self {
        let mut report = ValidationReport::default();

        match field(text, "SCORE:").and_then(|v| {
            // Tolerate "85/100" and "85.0" style answers.
            let digits: String = v.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>().ok()
        }) {
            Some(score) => report.score = score.min(100) as u8,
            None => {
                tracing::warn!("validator response missing SCORE, defaulting to 50");
                return report;
            }
        }

        report.passed = field(text, "PASS:")
            .map(|v| v.to_lowercase().starts_with("true") || v.to_lowercase().starts_with("yes"))
            .unwrap_or(false);

        if let Some(v) = field(text, "AI_PATTERNS:") {
            report.ai_patterns = parse_list(v);
        }
        if let Some(v) = field(text, "HUMAN_MARKERS:") {
            report.human_markers = parse_list(v);
        }
        if let Some(v) = field(text, "ISSUES:") {
            report.issues = parse_list(v);
        }

        report
    }
}
