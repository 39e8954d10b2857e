// WAN 2.2 prompt generation pipeline.
// Implements: subject enhancement, system prompt, request assembly, reply parsing,
// structure validation, progress notification, orchestration.
// The remote model is only reached through llm_client::ModelClient.

pub mod enhancer;
pub mod generator;
pub mod parser;
pub mod progress;
pub mod prompts;
pub mod request_parts;
pub mod validation;
