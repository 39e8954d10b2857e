//! Prompt generation — orchestrates one node invocation.
//!
//! Flow: availability check → subject check → enhance subject → custom
//!       instructions → system prompt → content parts → model call →
//!       parse reply → validate → notify → outcome.
//!
//! Model call failures never escape: they are folded into fallback outcomes.
//! Only the subject check can return `Err`.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::PrompterError;
use crate::generation::enhancer::enhance_subject;
use crate::generation::parser::parse_reply;
use crate::generation::progress::{ExpertUpdate, NoopProgress, ProgressSink};
use crate::generation::prompts::build_system_prompt;
use crate::generation::request_parts::assemble_parts;
use crate::generation::validation::{validate_prompt_structure, ValidationReport};
use crate::llm_client::{ContentPart, GeminiClient, ModelClient};
use crate::models::outcome::{GenerationOutcome, ModeStatus};
use crate::models::request::{GenerationRequest, SubjectRule};

/// Enhanced subject plus any custom instructions, as sent after the system prompt.
pub fn compose_user_input<R: Rng + ?Sized>(request: &GenerationRequest, rng: &mut R) -> String {
    let mut enhanced = enhance_subject(&request.subject, request.style, request.scene, rng);
    if let Some(extra) = request.trimmed_instructions() {
        enhanced.push_str(&format!("\n\nAdditional Creative Direction: {extra}"));
    }
    enhanced
}

/// Builds the content parts for a request. Pure apart from the random draws.
pub fn prepare_parts<R: Rng + ?Sized>(
    request: &GenerationRequest,
    rng: &mut R,
) -> Result<Vec<ContentPart>, PrompterError> {
    let user_input = compose_user_input(request, rng);
    let system_prompt = build_system_prompt(
        request.wan_model,
        request.style,
        request.scene,
        request.explicit_content,
        rng,
    );
    assemble_parts(&system_prompt, &user_input, request.reference_image.as_ref())
}

/// The prompter node. Cheap to clone; share one per host process.
#[derive(Clone)]
pub struct Prompter {
    model: Option<Arc<dyn ModelClient>>,
    progress: Arc<dyn ProgressSink>,
    subject_rule: SubjectRule,
}

impl Prompter {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            model: Some(model),
            progress: Arc::new(NoopProgress),
            subject_rule: SubjectRule::default(),
        }
    }

    /// A prompter for hosts without the remote model integration.
    pub fn unavailable() -> Self {
        Self {
            model: None,
            progress: Arc::new(NoopProgress),
            subject_rule: SubjectRule::default(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, PrompterError> {
        let client = GeminiClient::new(config)?;
        info!("Gemini client initialized (base: {})", config.gemini_api_base);
        Ok(Self::new(Arc::new(client)))
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_subject_rule(mut self, rule: SubjectRule) -> Self {
        self.subject_rule = rule;
        self
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, PrompterError> {
        self.generate_with(request, StdRng::from_entropy()).await
    }

    /// Same as `generate` with a caller-supplied randomness source.
    pub async fn generate_with<R: Rng + Send>(
        &self,
        request: &GenerationRequest,
        mut rng: R,
    ) -> Result<GenerationOutcome, PrompterError> {
        let Some(model) = self.model.as_ref() else {
            warn!("Remote model integration not available; skipping generation");
            return Ok(GenerationOutcome::unavailable());
        };

        if let Err(e) = self.subject_rule.check(&request.subject) {
            warn!("Rejected subject ({}): {e}", e.code());
            return Err(e);
        }

        let status =
            ModeStatus::for_request(request.explicit_content, request.style, request.wan_model);

        let parts = match prepare_parts(request, &mut rng) {
            Ok(parts) => parts,
            Err(e) => {
                warn!("Failed to assemble request: {e}");
                return Ok(GenerationOutcome::call_failed(&request.subject, e, status));
            }
        };
        debug!(
            "Assembled {} content part(s) for {} ({}, {})",
            parts.len(),
            request.remote_model,
            request.style,
            request.scene
        );

        let reply = match model
            .generate_content(&request.remote_model, &parts, &request.credentials)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Model call to {} failed: {e}", request.remote_model);
                return Ok(GenerationOutcome::call_failed(&request.subject, e, status));
            }
        };

        let reply_text = reply.text();
        if reply_text.is_empty() {
            warn!("Model {} returned no text", request.remote_model);
            return Ok(GenerationOutcome::empty_reply(status));
        }

        let parsed = parse_reply(&reply_text);
        debug!(
            "Parsed reply: prompt {} chars, negative {} chars, analysis {} chars",
            parsed.optimized_prompt.len(),
            parsed.negative_prompt.len(),
            parsed.analysis.len()
        );
        let validation = validate_prompt_structure(&parsed.optimized_prompt);
        let word_count = validation.word_count;
        if !validation.word_count_valid {
            warn!("Generated prompt has {word_count} words, outside the 80-120 target");
        }

        let analysis = format!("{}\n\n{}", parsed.analysis, validation.summary_line());

        if let Some(node_id) = request.node_id.as_deref() {
            self.notify(node_id, request, validation);
        }

        info!(
            "Generated {word_count}-word prompt ({} | {})",
            request.style, request.wan_model
        );

        Ok(GenerationOutcome {
            optimized_prompt: parsed.optimized_prompt,
            negative_prompt: parsed.negative_prompt,
            analysis,
            word_count,
            mode_status: status.to_string(),
        })
    }

    fn notify(
        &self,
        node_id: &str,
        request: &GenerationRequest,
        validation: ValidationReport,
    ) {
        let word_count = validation.word_count;
        if let Err(e) = self
            .progress
            .send_progress_text(node_id, &format!("Generated {word_count}-word WAN 2.2 prompt"))
        {
            warn!("Progress text for node {node_id} not delivered: {e}");
        }

        let update = ExpertUpdate {
            node_id: node_id.to_string(),
            word_count,
            nsfw_mode: request.explicit_content,
            style: request.style,
            model: request.wan_model,
            validation,
        };
        if let Err(e) = self.progress.send_update(update) {
            warn!("Progress update for node {node_id} not delivered: {e}");
        }
    }
}
