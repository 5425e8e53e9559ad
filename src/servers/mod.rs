//! Server handlers for each MCP category
//!
//! One handler per category, selected by an exhaustive match over the
//! closed ServerCategory enum at startup. All handlers expose the same
//! surface: a descriptor list for manifests and a JSON tool-call entry
//! point used by the planner and the demo runner.

mod autonomous;
mod capability;
mod data;
mod prompt;

pub use autonomous::{AutonomousServer, SolveResult};
pub use capability::CapabilityServer;
pub use data::DataServer;
pub use prompt::{PromptServer, PromptedResult};

use serde_json::Value;

use crate::config::LlmConfig;
use crate::error::{McpMathError, Result};
use crate::registry::ServerCategory;
use crate::tools::ToolDescriptor;

/// A constructed server instance for one category
pub enum ServerHandler {
    Capability(CapabilityServer),
    Data(DataServer),
    Prompt(PromptServer),
    Autonomous(AutonomousServer),
}

impl ServerHandler {
    /// Construct the handler for a category
    ///
    /// The autonomous handler picks its reasoning provider here, based on
    /// credential availability at startup.
    pub fn build(category: ServerCategory, llm: &LlmConfig) -> Result<Self> {
        match category {
            ServerCategory::Capability => Ok(Self::Capability(CapabilityServer)),
            ServerCategory::Data => Ok(Self::Data(DataServer)),
            ServerCategory::Prompt => Ok(Self::Prompt(PromptServer)),
            ServerCategory::Autonomous => Ok(Self::Autonomous(AutonomousServer::from_config(llm)?)),
        }
    }

    /// Which category this handler serves
    pub fn category(&self) -> ServerCategory {
        match self {
            Self::Capability(_) => ServerCategory::Capability,
            Self::Data(_) => ServerCategory::Data,
            Self::Prompt(_) => ServerCategory::Prompt,
            Self::Autonomous(_) => ServerCategory::Autonomous,
        }
    }

    /// Tool descriptors advertised by this server
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        match self {
            Self::Capability(server) => server.descriptors(),
            Self::Data(server) => server.descriptors(),
            Self::Prompt(server) => server.descriptors(),
            Self::Autonomous(server) => server.descriptors(),
        }
    }

    /// Execute a named tool with JSON arguments
    pub async fn call(&self, tool: &str, args: &Value) -> Result<Value> {
        match self {
            Self::Capability(server) => server.call(tool, args),
            Self::Data(server) => server.call(tool, args),
            Self::Prompt(server) => server.call(tool, args),
            Self::Autonomous(server) => server.call(tool, args).await,
        }
    }
}

/// Pull a required numeric argument out of a tool-call payload
pub(crate) fn require_number(args: &Value, tool: &str, name: &str) -> Result<f64> {
    args.get(name)
        .and_then(|value| value.as_f64())
        .ok_or_else(|| {
            McpMathError::InvalidCommand(format!(
                "Tool '{}' requires numeric argument '{}'",
                tool, name
            ))
        })
}

/// Pull a required string argument out of a tool-call payload
pub(crate) fn require_str<'a>(args: &'a Value, tool: &str, name: &str) -> Result<&'a str> {
    args.get(name)
        .and_then(|value| value.as_str())
        .ok_or_else(|| {
            McpMathError::InvalidCommand(format!(
                "Tool '{}' requires string argument '{}'",
                tool, name
            ))
        })
}
