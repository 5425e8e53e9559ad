//! Server blueprint registry
//!
//! Maps server names and aliases to blueprints describing the four MCP
//! interaction categories. The registry is built once at startup and passed
//! by reference to every consumer; it is never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{McpMathError, Result};

/// The closed set of MCP interaction categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerCategory {
    Capability,
    Data,
    Prompt,
    Autonomous,
}

impl ServerCategory {
    /// Human-readable label used in manifests and intros
    pub fn label(&self) -> &'static str {
        match self {
            Self::Capability => "Capability Discovery / Tool Registration",
            Self::Data => "Data-Providing / Context-Enriching",
            Self::Prompt => "Prompt-Returning / Co-Reasoning",
            Self::Autonomous => "Autonomous / Server-Side Reasoning",
        }
    }
}

/// Describes an example server and the category it demonstrates
#[derive(Debug, Clone)]
pub struct ServerBlueprint {
    /// Unique server identifier
    pub name: &'static str,
    /// Additional names that reference the same blueprint
    pub aliases: &'static [&'static str],
    /// Which interaction pattern the server demonstrates
    pub category: ServerCategory,
    /// Short description of the server capabilities
    pub summary: &'static str,
    /// Instructions printed when a session connects
    pub instructions: &'static str,
}

/// Immutable lookup table over the built-in blueprints
#[derive(Debug, Clone)]
pub struct Registry {
    blueprints: Vec<ServerBlueprint>,
}

impl Registry {
    /// Build the registry of the four demonstration servers
    pub fn builtin() -> Self {
        Self {
            blueprints: vec![
                ServerBlueprint {
                    name: "math-capability-registry",
                    aliases: &["capability", "discovery"],
                    category: ServerCategory::Capability,
                    summary: "Advertises math tools without executing them, ideal for capability discovery.",
                    instructions: "The math capability registry demonstrates MCP's discovery pattern. \
                         Inspect the manifest to learn which arithmetic tools exist before \
                         calling into the execution-focused servers in this package.",
                },
                ServerBlueprint {
                    name: "math-data-provider",
                    aliases: &["data", "provider"],
                    category: ServerCategory::Data,
                    summary: "Executes math operations and returns structured JSON payloads.",
                    instructions: "Executes arithmetic operations and returns structured JSON payloads \
                         that other agents can reason over.",
                },
                ServerBlueprint {
                    name: "math-prompt-helper",
                    aliases: &["prompt", "co-reasoning"],
                    category: ServerCategory::Prompt,
                    summary: "Pairs math data with a suggested follow-up prompt for co-reasoning.",
                    instructions: "Demonstrates prompt-returning MCP responses by pairing math results with \
                         a suggested follow-up prompt the model can immediately run.",
                },
                ServerBlueprint {
                    name: "math-autonomous-reasoner",
                    aliases: &["autonomous", "reasoner"],
                    category: ServerCategory::Autonomous,
                    summary: "Delegates math problem solving to an internal reasoning call.",
                    instructions: "Delegates math reasoning to an internal OpenAI call and returns the final answer \
                         plus reasoning steps. Falls back to a heuristic reasoner if credentials are missing.",
                },
            ],
        }
    }

    /// Fetch a blueprint by name or alias (case-insensitive)
    pub fn resolve(&self, key: &str) -> Result<&ServerBlueprint> {
        let normalized = key.to_lowercase();
        self.blueprints
            .iter()
            .find(|blueprint| {
                blueprint.name == normalized
                    || blueprint.aliases.iter().any(|alias| *alias == normalized)
            })
            .ok_or_else(|| McpMathError::ServerNotFound {
                name: key.to_string(),
                available: self.available_names().join(", "),
            })
    }

    /// All blueprints in registration order
    pub fn list_all(&self) -> &[ServerBlueprint] {
        &self.blueprints
    }

    fn available_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for blueprint in &self.blueprints {
            names.push(blueprint.name.to_string());
            names.extend(blueprint.aliases.iter().map(|alias| alias.to_string()));
        }
        names.sort();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
