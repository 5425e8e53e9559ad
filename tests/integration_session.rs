//! Session-level integration tests
//!
//! Exercises the public API the way the REPL does: resolve a blueprint,
//! build its handler, and run commands through the handlers and the
//! planner with a mock LLM client.

use mcp_math::chat::parse_manual_command;
use mcp_math::config::LlmConfig;
use mcp_math::error::McpMathError;
use mcp_math::llm::{MockLlmClient, ReasoningSource};
use mcp_math::planner::Planner;
use mcp_math::registry::{Registry, ServerCategory};
use mcp_math::servers::ServerHandler;
use serde_json::json;

fn build(registry: &Registry, key: &str) -> ServerHandler {
    let blueprint = registry.resolve(key).unwrap();
    ServerHandler::build(blueprint.category, &LlmConfig::default()).unwrap()
}

/// Manual data session: `add 2 3` produces the documented JSON payload
#[tokio::test]
async fn test_manual_data_add_end_to_end() {
    let registry = Registry::builtin();
    let handler = build(&registry, "data");

    let (operation, left, right) = parse_manual_command("add 2 3").unwrap();
    let payload = handler
        .call(operation.tool_name(), &json!({"augend": left, "addend": right}))
        .await
        .unwrap();

    assert_eq!(
        payload,
        json!({
            "operation": "addition",
            "inputs": {"augend": 2.0, "addend": 3.0},
            "result": 5.0
        })
    );
}

/// Data and prompt servers agree on the arithmetic fields
#[tokio::test]
async fn test_data_and_prompt_results_agree() {
    let registry = Registry::builtin();
    let data = build(&registry, "data");
    let prompt = build(&registry, "prompt");

    let args = json!({"dividend": 9.0, "divisor": 3.0});
    let data_payload = data.call("math_divide", &args).await.unwrap();
    let prompt_payload = prompt.call("math_divide_with_prompt", &args).await.unwrap();

    assert_eq!(data_payload["operation"], prompt_payload["operation"]);
    assert_eq!(data_payload["inputs"], prompt_payload["inputs"]);
    assert_eq!(data_payload["result"], prompt_payload["result"]);
    assert!(!prompt_payload["next_prompt"].as_str().unwrap().is_empty());
    assert!(data_payload.get("next_prompt").is_none());
}

/// Division by zero is reported, not computed
#[tokio::test]
async fn test_divide_by_zero_is_an_error() {
    let registry = Registry::builtin();
    let handler = build(&registry, "data");

    let err = handler
        .call("math_divide", &json!({"dividend": 1.0, "divisor": 0.0}))
        .await
        .unwrap_err();
    assert!(matches!(err, McpMathError::DivisionByZero));
}

/// The capability registry describes tools but refuses to run them
#[tokio::test]
async fn test_capability_registry_is_read_only() {
    let registry = Registry::builtin();
    let handler = build(&registry, "capability");

    let names: Vec<String> = handler.descriptors().into_iter().map(|d| d.name).collect();
    assert_eq!(
        names,
        vec!["math_add", "math_subtract", "math_multiply", "math_divide"]
    );

    for tool in names {
        let err = handler
            .call(&tool, &json!({"augend": 1.0, "addend": 2.0}))
            .await
            .unwrap_err();
        assert!(matches!(err, McpMathError::Disabled(_)));
    }
}

/// Planner turn: one mock LLM call, one tool execution, rendered outcome
#[tokio::test]
async fn test_planner_call_tool_turn() {
    let registry = Registry::builtin();
    let handler = build(&registry, "data");
    let planner = Planner::new(
        Box::new(MockLlmClient::new(
            r#"{"type":"call_tool","tool_name":"math_add","arguments":{"augend":2,"addend":3}}"#,
        )),
        "gpt-4.1-mini",
    );

    let outcome = planner.run("what is two plus three?", &handler).await.unwrap();
    assert_eq!(outcome.tool_name.as_deref(), Some("math_add"));
    assert_eq!(outcome.arguments, Some(json!({"augend": 2, "addend": 3})));
    assert_eq!(outcome.tool_result.as_ref().unwrap()["result"], json!(5.0));
}

/// Planner contract violations surface as typed errors
#[tokio::test]
async fn test_planner_contract_violations() {
    let registry = Registry::builtin();
    let handler = build(&registry, "data");

    let unknown_tool = Planner::new(
        Box::new(MockLlmClient::new(
            r#"{"type":"call_tool","tool_name":"math_unknown","arguments":{}}"#,
        )),
        "gpt-4.1-mini",
    );
    assert!(matches!(
        unknown_tool.run("?", &handler).await.unwrap_err(),
        McpMathError::UnknownTool(_)
    ));

    let not_json = Planner::new(
        Box::new(MockLlmClient::new("I would be happy to help with that!")),
        "gpt-4.1-mini",
    );
    assert!(matches!(
        not_json.run("?", &handler).await.unwrap_err(),
        McpMathError::MalformedPlannerResponse(_)
    ));
}

/// Autonomous session without credentials: heuristic fallback end to end
#[tokio::test]
async fn test_autonomous_heuristic_fallback() {
    let registry = Registry::builtin();
    let handler = build(&registry, "autonomous");

    let payload = handler
        .call("solve_math_problem", &json!({"problem": "double 7 then subtract 3"}))
        .await
        .unwrap();

    assert_eq!(payload["final_answer"], json!("11"));
    assert_eq!(payload["source"], json!("heuristic"));
    assert!(payload["reasoning_steps"].as_array().unwrap().len() >= 2);
}

/// Blueprint resolution covers names and aliases; unknown keys report
/// what is available
#[test]
fn test_registry_resolution() {
    let registry = Registry::builtin();

    assert_eq!(registry.resolve("data").unwrap().name, "math-data-provider");
    assert_eq!(
        registry.resolve("math-prompt-helper").unwrap().category,
        ServerCategory::Prompt
    );

    let err = registry.resolve("nope").unwrap_err();
    assert!(err.to_string().contains("Available:"));
}

/// Heuristic source marker survives serialization
#[test]
fn test_reasoning_source_serialization() {
    assert_eq!(
        serde_json::to_value(ReasoningSource::Heuristic).unwrap(),
        json!("heuristic")
    );
    assert_eq!(
        serde_json::to_value(ReasoningSource::OpenAi).unwrap(),
        json!("openai")
    );
}
