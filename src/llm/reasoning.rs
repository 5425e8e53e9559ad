//! Reasoning provider abstraction
//!
//! The autonomous server delegates problem solving through this trait so a
//! remote OpenAI call and the local heuristic are interchangeable. Which
//! implementation runs is decided by credential availability, not by the
//! caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::llm::client::{CompletionRequest, LlmClient};

/// Where a reasoning result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningSource {
    OpenAi,
    Heuristic,
}

/// Step-by-step reasoning output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reasoning {
    pub steps: Vec<String>,
    pub answer: String,
    pub model: String,
}

/// A strategy for solving a natural-language math problem
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Which source this provider reports in results
    fn source(&self) -> ReasoningSource;

    /// Decompose the problem into steps and a final answer
    async fn solve(&self, problem: &str, model: Option<&str>) -> Result<Reasoning>;
}

/// Instruction prompt fed to the remote reasoning call
const REASONER_SYSTEM_PROMPT: &str = "You are an autonomous math tutor. Solve the user's problem step by step and \
     produce JSON with keys 'reasoning_steps' (list of short steps) and 'final_answer'. \
     Keep reasoning grounded in arithmetic and avoid prose outside the JSON.";

/// Remote reasoner backed by an LLM chat call
pub struct RemoteReasoner {
    client: Box<dyn LlmClient>,
    default_model: String,
}

impl RemoteReasoner {
    pub fn new(client: Box<dyn LlmClient>, default_model: impl Into<String>) -> Self {
        Self {
            client,
            default_model: default_model.into(),
        }
    }

    /// Interpret the model's reply, tolerating non-JSON output
    ///
    /// A reply that is not a JSON object is treated as a single reasoning
    /// step and the answer at once, matching how loosely models follow the
    /// json-only instruction.
    fn interpret(raw: &str) -> (Vec<String>, String) {
        let parsed: Option<Value> = serde_json::from_str(raw).ok();
        let Some(parsed) = parsed else {
            let text = raw.trim().to_string();
            return (vec![text.clone()], text);
        };

        let steps: Vec<String> = parsed
            .get("reasoning_steps")
            .and_then(|s| s.as_array())
            .map(|items| {
                items
                    .iter()
                    .map(|item| match item.as_str() {
                        Some(text) => text.to_string(),
                        None => item.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let answer = parsed
            .get("final_answer")
            .map(|a| match a.as_str() {
                Some(text) => text.to_string(),
                None => a.to_string(),
            })
            .or_else(|| steps.last().cloned())
            .unwrap_or_else(|| raw.trim().to_string());

        let steps = if steps.is_empty() { vec![answer.clone()] } else { steps };
        (steps, answer)
    }
}

#[async_trait]
impl ReasoningProvider for RemoteReasoner {
    fn source(&self) -> ReasoningSource {
        ReasoningSource::OpenAi
    }

    async fn solve(&self, problem: &str, model: Option<&str>) -> Result<Reasoning> {
        let model = model.unwrap_or(&self.default_model).to_string();
        let request = CompletionRequest::new(REASONER_SYSTEM_PROMPT)
            .with_user_message(format!(
                "Solve this math problem and respond with JSON only.\nProblem: {}",
                problem
            ))
            .with_model(model.clone())
            .with_temperature(0.1);

        let raw = self.client.complete(request).await?;
        let (steps, answer) = Self::interpret(&raw);

        Ok(Reasoning {
            steps,
            answer,
            model,
        })
    }
}
