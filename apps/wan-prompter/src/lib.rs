//! WAN 2.2 Expert Prompter — turns a short video concept into an 80-120 word
//! WAN 2.2 prompt, a negative prompt and a short analysis via a remote LLM.
//!
//! Hosts build a `GenerationRequest`, call `Prompter::generate`, and read back
//! the five-value `GenerationOutcome`.

pub mod config;
pub mod errors;
pub mod generation;
pub mod llm_client;
pub mod models;
pub mod node;
pub mod telemetry;

pub use config::Config;
pub use errors::PrompterError;
pub use generation::generator::Prompter;
pub use generation::parser::parse_reply;
pub use generation::validation::{validate_prompt_structure, ValidationReport};
pub use models::image::ImageBatch;
pub use models::outcome::{GenerationOutcome, ParsedResult};
pub use models::request::{
    AuthCredentials, CinematicStyle, GenerationRequest, SceneType, SubjectRule, WanModel,
};
pub use telemetry::init_tracing;
