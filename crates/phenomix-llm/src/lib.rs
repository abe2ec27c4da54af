//! # Phenomix LLM
//!
//! Chat-completion access for the question-answering pipeline: the
//! [`ChatModel`] trait, an OpenAI-compatible HTTP implementation and the
//! system prompt templates.

pub mod client;
pub mod error;
pub mod openai;
pub mod prompts;

pub use client::ChatModel;
pub use error::{LlmError, LlmResult};
pub use openai::{LlmConfig, OpenAiChat};
