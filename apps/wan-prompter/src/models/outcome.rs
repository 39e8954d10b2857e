use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::request::{CinematicStyle, WanModel};

pub const FALLBACK_PROMPT: &str = "Failed to generate optimized prompt";
pub const FALLBACK_NEGATIVE: &str = "–no text overlay, –no distorted faces, –no blurriness";
pub const FALLBACK_ANALYSIS: &str = "Generated using WAN 2.2 expert prompting methodology";

/// Negative prompt used when the model call itself fails.
pub const ERROR_NEGATIVE: &str = "–no blurriness, –no artifacts, –no text overlay";
/// Negative prompt used when the model answers with no text.
pub const EMPTY_REPLY_NEGATIVE: &str = "–no blurriness";

/// The three fields extracted from a model reply. Never empty after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResult {
    pub optimized_prompt: String,
    pub negative_prompt: String,
    pub analysis: String,
}

/// Content-mode indicator leading every status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeIndicator {
    Normal,
    Nsfw,
    Error,
}

impl ModeIndicator {
    fn label(&self) -> &'static str {
        match self {
            ModeIndicator::Normal => "🎬 Normal",
            ModeIndicator::Nsfw => "🔞 NSFW",
            ModeIndicator::Error => "🔴 Error",
        }
    }
}

/// `indicator | style | model` status label shown on the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeStatus {
    pub indicator: ModeIndicator,
    pub style: CinematicStyle,
    pub model: WanModel,
}

impl ModeStatus {
    pub fn for_request(explicit: bool, style: CinematicStyle, model: WanModel) -> Self {
        let indicator = if explicit {
            ModeIndicator::Nsfw
        } else {
            ModeIndicator::Normal
        };
        Self {
            indicator,
            style,
            model,
        }
    }

    /// Same style and model, error glyph in front.
    pub fn as_error(&self) -> Self {
        Self {
            indicator: ModeIndicator::Error,
            ..*self
        }
    }
}

impl fmt::Display for ModeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            self.indicator.label(),
            self.style,
            self.model
        )
    }
}

/// Label used when no model integration is wired into the host.
pub const UNAVAILABLE_STATUS: &str = "🔴 API Unavailable";

/// The five values handed back to the host graph, in output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub optimized_prompt: String,
    pub negative_prompt: String,
    pub analysis: String,
    pub word_count: usize,
    pub mode_status: String,
}

impl GenerationOutcome {
    pub fn unavailable() -> Self {
        Self {
            optimized_prompt: "Error: Gemini API not available.".to_string(),
            negative_prompt: String::new(),
            analysis: "Dependencies missing".to_string(),
            word_count: 0,
            mode_status: UNAVAILABLE_STATUS.to_string(),
        }
    }

    pub fn empty_reply(status: ModeStatus) -> Self {
        Self {
            optimized_prompt: "Error: Empty response".to_string(),
            negative_prompt: EMPTY_REPLY_NEGATIVE.to_string(),
            analysis: "API returned empty response".to_string(),
            word_count: 0,
            mode_status: status.to_string(),
        }
    }

    pub fn call_failed(subject: &str, error: impl fmt::Display, status: ModeStatus) -> Self {
        Self {
            optimized_prompt: format!("API Error - fallback for subject: {subject}"),
            negative_prompt: ERROR_NEGATIVE.to_string(),
            analysis: error.to_string(),
            word_count: 0,
            mode_status: status.as_error().to_string(),
        }
    }

    /// True for every outcome that did not come from a parsed reply.
    pub fn is_degraded(&self) -> bool {
        self.word_count == 0 || self.optimized_prompt == FALLBACK_PROMPT
    }

    pub fn into_tuple(self) -> (String, String, String, usize, String) {
        (
            self.optimized_prompt,
            self.negative_prompt,
            self.analysis,
            self.word_count,
            self.mode_status,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_status_has_three_tokens_in_order() {
        let status = ModeStatus::for_request(false, CinematicStyle::Dramatic, WanModel::I2vA14b);
        assert_eq!(status.to_string(), "🎬 Normal | dramatic | I2V-A14B");

        let status = ModeStatus::for_request(true, CinematicStyle::Gentle, WanModel::Ti2v5b);
        assert_eq!(status.to_string(), "🔞 NSFW | gentle | TI2V-5B");
    }

    #[test]
    fn test_error_status_keeps_style_and_model() {
        let status = ModeStatus::for_request(true, CinematicStyle::Stylized, WanModel::T2vA14b);
        assert_eq!(status.as_error().to_string(), "🔴 Error | stylized | T2V-A14B");
    }

    #[test]
    fn test_call_failed_outcome_embeds_subject_and_error() {
        let status = ModeStatus::for_request(false, CinematicStyle::Cinematic, WanModel::T2vA14b);
        let outcome = GenerationOutcome::call_failed("a fox", "connection refused", status);
        assert_eq!(outcome.optimized_prompt, "API Error - fallback for subject: a fox");
        assert_eq!(outcome.negative_prompt, ERROR_NEGATIVE);
        assert_eq!(outcome.analysis, "connection refused");
        assert_eq!(outcome.word_count, 0);
        assert!(outcome.mode_status.starts_with("🔴 Error"));
        assert!(outcome.is_degraded());
    }

    #[test]
    fn test_into_tuple_keeps_output_order() {
        let outcome = GenerationOutcome {
            optimized_prompt: "p".to_string(),
            negative_prompt: "n".to_string(),
            analysis: "a".to_string(),
            word_count: 1,
            mode_status: "s".to_string(),
        };
        assert_eq!(
            outcome.into_tuple(),
            ("p".to_string(), "n".to_string(), "a".to_string(), 1, "s".to_string())
        );
    }
}
