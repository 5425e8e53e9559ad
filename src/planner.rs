//! LLM-driven planner that routes natural language to tools
//!
//! One planner invocation is one external call and at most one local tool
//! execution. The LLM must answer with a single JSON decision object;
//! malformed payloads are rejected outright rather than repaired, and the
//! planner never chains tool calls within a turn.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{McpMathError, Result};
use crate::llm::{CompletionRequest, LlmClient};
use crate::servers::ServerHandler;
use crate::tools::{ToolDescriptor, format_manifest};

/// Instruction template conveying the allowed JSON schema to the planner LLM
const PLANNER_SYSTEM_TEMPLATE: &str = r#"You are an MCP-aware planner sitting between a user and a set of tools.
You must ALWAYS respond with JSON that matches exactly this schema and nothing else:
{
  "type": "respond" | "call_tool",
  "text": string (required when type == "respond"),
  "tool_name": string (required when type == "call_tool"),
  "arguments": object (required when type == "call_tool")
}

Available tools:
{manifest}

Rules:
- Respond with a single JSON object with no surrounding prose or Markdown fences.
- Only call tools listed above.
- When calling a tool, supply exactly the JSON arguments the tool expects.
- If no tool is needed, reply with type "respond" and a helpful natural-language message.
- Never output additional prose outside the JSON object."#;

/// Structured instruction returned by the planner LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlannerDecision {
    /// Reply to the user directly
    Respond { text: String },
    /// Invoke exactly one tool with the given arguments
    CallTool { tool_name: String, arguments: Value },
}

/// Final planner outcome combining the decision and any tool payload
#[derive(Debug, Clone, Serialize)]
pub struct PlannerOutcome {
    /// Text that should be relayed to the user
    pub message: String,
    /// Tool invoked during planning, if any
    pub tool_name: Option<String>,
    /// Arguments that were supplied to the invoked tool
    pub arguments: Option<Value>,
    /// Raw payload returned by the tool invocation
    pub tool_result: Option<Value>,
    /// Unmodified LLM JSON string for auditing
    pub raw_response: String,
}

/// Single-step planner over an LLM client
pub struct Planner {
    client: Box<dyn LlmClient>,
    model: String,
}

impl Planner {
    pub fn new(client: Box<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Ask the LLM for a decision about the user's utterance
    ///
    /// Performs exactly one external call. The returned decision has been
    /// validated against the manifest but not executed.
    pub async fn decide(
        &self,
        user_text: &str,
        manifest: &[ToolDescriptor],
    ) -> Result<(PlannerDecision, String)> {
        let system = PLANNER_SYSTEM_TEMPLATE.replace("{manifest}", &format_manifest(manifest));
        let request = CompletionRequest::new(system)
            .with_user_message(user_text)
            .with_model(self.model.clone())
            .with_temperature(0.0);

        let raw = self.client.complete(request).await?;
        let decision = Self::parse_decision(&raw)?;
        Self::validate(&decision, manifest)?;
        Ok((decision, raw))
    }

    /// Decide and, when asked for, execute the single tool call
    pub async fn run(&self, user_text: &str, server: &ServerHandler) -> Result<PlannerOutcome> {
        let manifest = server.descriptors();
        let (decision, raw_response) = self.decide(user_text, &manifest).await?;

        match decision {
            PlannerDecision::Respond { text } => Ok(PlannerOutcome {
                message: text,
                tool_name: None,
                arguments: None,
                tool_result: None,
                raw_response,
            }),
            PlannerDecision::CallTool { tool_name, arguments } => {
                let payload = server.call(&tool_name, &arguments).await?;
                let message = render_tool_message(&tool_name, &payload);
                Ok(PlannerOutcome {
                    message,
                    tool_name: Some(tool_name),
                    arguments: Some(arguments),
                    tool_result: Some(payload),
                    raw_response,
                })
            }
        }
    }

    /// Deserialize planner JSON into a decision, rejecting anything that is
    /// not a single well-formed object
    fn parse_decision(raw: &str) -> Result<PlannerDecision> {
        let decision: PlannerDecision = serde_json::from_str(raw.trim())
            .map_err(|e| McpMathError::MalformedPlannerResponse(format!("{} in: {}", e, raw)))?;

        if let PlannerDecision::Respond { text } = &decision {
            if text.trim().is_empty() {
                return Err(McpMathError::MalformedPlannerResponse(
                    "respond decision carried no text".to_string(),
                ));
            }
        }
        Ok(decision)
    }

    fn validate(decision: &PlannerDecision, manifest: &[ToolDescriptor]) -> Result<()> {
        if let PlannerDecision::CallTool { tool_name, .. } = decision {
            if !manifest.iter().any(|descriptor| descriptor.name == *tool_name) {
                return Err(McpMathError::UnknownTool(tool_name.clone()));
            }
        }
        Ok(())
    }
}

/// Deterministic user-facing summary of a completed tool call
fn render_tool_message(tool_name: &str, payload: &Value) -> String {
    match payload.get("result") {
        Some(result) => format!("Executed {}: result {}", tool_name, result),
        None => match payload.get("final_answer") {
            Some(answer) => format!("Executed {}: final answer {}", tool_name, answer),
            None => format!("Executed {}: {}", tool_name, payload),
        },
    }
}
