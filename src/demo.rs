//! Demo scenarios exercising each server category
//!
//! Non-interactive walkthroughs: print a server's intro and manifest, then
//! run one representative tool call so the category's response shape is
//! visible without a REPL session.

use colored::*;
use serde_json::json;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::registry::{Registry, ServerCategory};
use crate::servers::ServerHandler;

/// Describes how the demo client exercises a server blueprint
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    /// Blueprint name or alias to load for the scenario
    pub server: &'static str,
}

/// All demo scenarios, in presentation order
pub fn scenarios() -> &'static [Scenario] {
    &[
        Scenario {
            name: "capability",
            description: "Inspect the manifest returned by the capability registry server.",
            server: "capability",
        },
        Scenario {
            name: "data",
            description: "Execute real math tools returning structured JSON.",
            server: "data",
        },
        Scenario {
            name: "prompt",
            description: "Observe data paired with a suggested follow-up prompt.",
            server: "prompt",
        },
        Scenario {
            name: "autonomous",
            description: "Delegate a math word problem to the autonomous reasoner.",
            server: "autonomous",
        },
    ]
}

/// Print the scenario list
pub fn list_scenarios() {
    println!("Available scenarios:");
    for scenario in scenarios() {
        println!("  - {}: {}", scenario.name, scenario.description);
    }
}

/// Run one scenario, or all of them when `key` is None
pub async fn run(registry: &Registry, llm: &LlmConfig, key: Option<&str>) -> Result<()> {
    match key {
        None => {
            for scenario in scenarios() {
                run_scenario(registry, llm, scenario).await?;
            }
            Ok(())
        }
        Some(key) => {
            // Scenario keys double as blueprint aliases, so resolution and
            // error reporting go through the registry
            let blueprint = registry.resolve(key)?;
            let scenario = scenarios()
                .iter()
                .find(|scenario| {
                    registry
                        .resolve(scenario.server)
                        .map(|candidate| candidate.name == blueprint.name)
                        .unwrap_or(false)
                })
                .copied()
                .unwrap_or(Scenario {
                    name: blueprint.name,
                    description: blueprint.summary,
                    server: blueprint.name,
                });
            run_scenario(registry, llm, &scenario).await
        }
    }
}

async fn run_scenario(registry: &Registry, llm: &LlmConfig, scenario: &Scenario) -> Result<()> {
    println!("{}", format!("\n=== Scenario: {} ===", scenario.name).cyan());

    let blueprint = registry.resolve(scenario.server)?;
    let handler = ServerHandler::build(blueprint.category, llm)?;

    println!("{} [{}]", blueprint.name, blueprint.category.label());
    println!("Instructions: {}", blueprint.instructions);
    println!("Tools:");
    for descriptor in handler.descriptors() {
        println!("  - {}: {}", descriptor.name, descriptor.description);
        println!("    schema: {}", serde_json::to_string_pretty(&descriptor.input_schema())?);
    }

    let sample = match blueprint.category {
        ServerCategory::Capability => None,
        ServerCategory::Data => Some(("math_add", json!({"augend": 8, "addend": 13}))),
        ServerCategory::Prompt => Some(("math_add_with_prompt", json!({"augend": 5, "addend": 11}))),
        ServerCategory::Autonomous => Some((
            "solve_math_problem",
            json!({"problem": "If you triple 4 and subtract 5, what do you get?"}),
        )),
    };

    if let Some((tool, args)) = sample {
        let payload = handler.call(tool, &args).await?;
        println!("Sample response: {}", serde_json::to_string_pretty(&payload)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios_cover_every_category() {
        let registry = Registry::builtin();
        let mut categories: Vec<ServerCategory> = scenarios()
            .iter()
            .map(|scenario| registry.resolve(scenario.server).unwrap().category)
            .collect();
        categories.dedup();
        assert_eq!(categories.len(), 4);
    }

    #[tokio::test]
    async fn test_run_single_scenario() {
        let registry = Registry::builtin();
        let llm = LlmConfig::default();
        run(&registry, &llm, Some("data")).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_unknown_scenario_fails() {
        let registry = Registry::builtin();
        let llm = LlmConfig::default();
        assert!(run(&registry, &llm, Some("bogus")).await.is_err());
    }
}
