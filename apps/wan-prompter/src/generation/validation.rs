use serde::{Deserialize, Serialize};

use crate::generation::parser::token_count;
use crate::generation::prompts::{MAX_WORDS, MIN_WORDS};

const CAMERA_TERMS: &[&str] = &[
    "pan", "tilt", "dolly", "track", "zoom", "orbit", "crane", "camera",
];

const VISUAL_TERMS: &[&str] = &["light", "shadow", "bokeh", "focus", "color"];

// Plain substring match: "as" also hits inside words like "vast".
const SEQUENCE_TERMS: &[&str] = &["→", "then", "as", "while", "revealing"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub word_count_valid: bool,
    pub word_count: usize,
    pub has_camera_movement: bool,
    pub has_visual_elements: bool,
    pub has_sequence_structure: bool,
    /// Not computed yet: no weighting between the checks has been defined.
    pub overall_score: u32,
}

impl ValidationReport {
    /// One-line summary appended to the analysis output.
    pub fn summary_line(&self) -> String {
        format!("Validation: {} words (target: {MIN_WORDS}-{MAX_WORDS})", self.word_count)
    }
}

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| haystack.contains(t))
}

/// Scores a prompt against the structural checks.
pub fn validate_prompt_structure(prompt: &str) -> ValidationReport {
    let word_count = token_count(prompt);
    let lower = prompt.to_lowercase();

    ValidationReport {
        word_count_valid: (MIN_WORDS..=MAX_WORDS).contains(&word_count),
        word_count,
        has_camera_movement: contains_any(&lower, CAMERA_TERMS),
        has_visual_elements: contains_any(&lower, VISUAL_TERMS),
        has_sequence_structure: contains_any(&lower, SEQUENCE_TERMS),
        overall_score: 0,
    }
}
