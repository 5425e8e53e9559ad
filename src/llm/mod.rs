//! LLM layer - OpenAI integration and reasoning providers
//!
//! This module provides:
//! - Message types for LLM communication
//! - LlmClient trait for API abstraction
//! - OpenAiClient implementation
//! - ReasoningProvider trait with remote and heuristic implementations

pub mod client;
pub mod heuristic;
pub mod openai;
pub mod reasoning;

pub use client::{CompletionRequest, LlmClient, Message, MockLlmClient, Role};
pub use heuristic::HeuristicReasoner;
pub use openai::{API_KEY_ENV, OpenAiClient, OpenAiConfig};
pub use reasoning::{Reasoning, ReasoningProvider, ReasoningSource, RemoteReasoner};
