use thiserror::Error;

use crate::llm_client::LlmError;

/// Crate-level error type.
///
/// Only input problems escape `Prompter::generate`; model call failures are
/// folded into fallback outcomes by the orchestrator.
#[derive(Debug, Error)]
pub enum PrompterError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown {kind} selector: '{value}'")]
    UnknownSelector { kind: &'static str, value: String },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Image encoding error: {0}")]
    Image(String),
}

impl PrompterError {
    /// Stable machine-readable code, surfaced in logs and host status messages.
    pub fn code(&self) -> &'static str {
        match self {
            PrompterError::InvalidInput(_) => "INVALID_INPUT",
            PrompterError::UnknownSelector { .. } => "UNKNOWN_SELECTOR",
            PrompterError::Llm(_) => "LLM_ERROR",
            PrompterError::Image(_) => "IMAGE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_selector_message_names_kind_and_value() {
        let err = PrompterError::UnknownSelector {
            kind: "style",
            value: "noir".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown style selector: 'noir'");
        assert_eq!(err.code(), "UNKNOWN_SELECTOR");
    }

    #[test]
    fn test_llm_error_converts_via_from() {
        let err: PrompterError = LlmError::UnsupportedModel("gpt-4o".to_string()).into();
        assert_eq!(err.code(), "LLM_ERROR");
        assert_eq!(err.to_string(), "LLM error: Unsupported model 'gpt-4o'");
    }
}
