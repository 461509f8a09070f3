// Cover letter generation: prompt building, draft/refine calls and the wizard pipeline.
// All LLM calls go through the `LlmProvider` trait; no direct HTTP calls here.

pub mod generator;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod tone;
