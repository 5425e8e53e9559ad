//! Autonomous reasoning server
//!
//! Delegates whole natural-language problems to a reasoning provider. The
//! remote OpenAI provider is used when credentials are configured; any
//! remote failure falls back to the local heuristic so a session keeps
//! working offline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::llm::{
    HeuristicReasoner, OpenAiClient, ReasoningProvider, ReasoningSource, RemoteReasoner,
};
use crate::servers::require_str;
use crate::tools::ToolDescriptor;

/// Tool name advertised by this server
pub const SOLVE_TOOL: &str = "solve_math_problem";

/// Serialized result returned by the autonomous server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Original user problem text
    pub problem: String,
    /// Step-by-step reasoning summary
    pub reasoning_steps: Vec<String>,
    /// Final answer reported to the user
    pub final_answer: String,
    /// Model identifier used to generate the response
    pub model: String,
    /// Which provider produced the result
    pub source: ReasoningSource,
}

/// Server that reasons internally instead of returning raw data
pub struct AutonomousServer {
    primary: Option<Box<dyn ReasoningProvider>>,
    fallback: HeuristicReasoner,
}

impl AutonomousServer {
    /// Build with an explicit primary provider (used in tests)
    pub fn new(primary: Option<Box<dyn ReasoningProvider>>) -> Self {
        Self {
            primary,
            fallback: HeuristicReasoner,
        }
    }

    /// Build from configuration, selecting the provider by credential
    /// availability
    pub fn from_config(llm: &LlmConfig) -> Result<Self> {
        if OpenAiClient::available() {
            let client = OpenAiClient::new(llm.into())?;
            let reasoner = RemoteReasoner::new(Box::new(client), llm.model.clone());
            Ok(Self::new(Some(Box::new(reasoner))))
        } else {
            log::info!("No OpenAI credentials configured; autonomous server will use the heuristic reasoner");
            Ok(Self::new(None))
        }
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new(
                SOLVE_TOOL,
                "Provide a natural language problem. The server reasons internally \
                 and returns the final answer with the reasoning path.",
            )
            .with_param("problem", "string")
            .with_optional_param("model", "string"),
        ]
    }

    /// Solve a problem, falling back to the heuristic on remote failure
    pub async fn solve(&self, problem: &str, model: Option<&str>) -> Result<SolveResult> {
        if let Some(primary) = &self.primary {
            match primary.solve(problem, model).await {
                Ok(reasoning) => {
                    return Ok(SolveResult {
                        problem: problem.to_string(),
                        reasoning_steps: reasoning.steps,
                        final_answer: reasoning.answer,
                        model: reasoning.model,
                        source: primary.source(),
                    });
                }
                Err(e) => {
                    log::warn!("Remote reasoning failed, falling back to heuristic: {}", e);
                }
            }
        }

        let reasoning = self.fallback.solve(problem, model).await?;
        Ok(SolveResult {
            problem: problem.to_string(),
            reasoning_steps: reasoning.steps,
            final_answer: reasoning.answer,
            model: reasoning.model,
            source: self.fallback.source(),
        })
    }

    /// JSON tool-call entry point used by the planner
    pub async fn call(&self, tool: &str, args: &Value) -> Result<Value> {
        if tool != SOLVE_TOOL {
            return Err(crate::error::McpMathError::UnknownTool(tool.to_string()));
        }

        let problem = require_str(args, tool, "problem")?;
        let model = args.get("model").and_then(|value| value.as_str());

        let result = self.solve(problem, model).await?;
        Ok(serde_json::to_value(result)?)
    }
}
