//! Prompt-returning server
//!
//! Same arithmetic core as the data provider, with a deterministic
//! follow-up prompt attached so a downstream reasoner can pick the result
//! up in its next step.

use serde_json::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{McpMathError, Result};
use crate::math::{MathResult, Operation};
use crate::servers::require_number;
use crate::tools::ToolDescriptor;

/// Structured payload returned by prompt-enhanced math tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptedResult {
    pub operation: String,
    pub inputs: BTreeMap<String, f64>,
    pub result: f64,
    /// Suggested prompt fragment for downstream reasoning
    pub next_prompt: String,
}

impl PromptedResult {
    fn from_math(result: MathResult) -> Self {
        let next_prompt = build_prompt(&result);
        Self {
            operation: result.operation,
            inputs: result.inputs,
            result: result.result,
            next_prompt,
        }
    }
}

/// Generate a follow-up prompt referencing the math result
///
/// Deterministic given (operation, inputs, result).
fn build_prompt(result: &MathResult) -> String {
    format!(
        "The {} result is {}. Inputs: {}. \
         Incorporate this numeric value into your next reasoning step. \
         If the user asked a follow-up, restate the interpreted question before responding.",
        result.operation,
        result.result,
        result.format_inputs()
    )
}

/// Executing server that pairs results with suggested prompts
pub struct PromptServer;

impl PromptServer {
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        Operation::ALL
            .iter()
            .map(|operation| {
                let (left, right) = operation.operand_names();
                ToolDescriptor::new(operation.prompt_tool_name(), Self::describe(*operation))
                    .with_param(left, "number")
                    .with_param(right, "number")
            })
            .collect()
    }

    /// Run one operation and attach its follow-up prompt
    pub fn execute(&self, operation: Operation, left: f64, right: f64) -> Result<PromptedResult> {
        let result = MathResult::evaluate(operation, left, right)?;
        Ok(PromptedResult::from_math(result))
    }

    /// JSON tool-call entry point used by the planner
    pub fn call(&self, tool: &str, args: &Value) -> Result<Value> {
        let operation = Operation::ALL
            .into_iter()
            .find(|operation| operation.prompt_tool_name() == tool)
            .ok_or_else(|| McpMathError::UnknownTool(tool.to_string()))?;

        let (left_name, right_name) = operation.operand_names();
        let left = require_number(args, tool, left_name)?;
        let right = require_number(args, tool, right_name)?;

        let result = self.execute(operation, left, right)?;
        Ok(serde_json::to_value(result)?)
    }

    fn describe(operation: Operation) -> &'static str {
        match operation {
            Operation::Add => "Return addition data plus a suggested follow-up prompt.",
            Operation::Subtract => "Return subtraction data plus a suggested follow-up prompt.",
            Operation::Multiply => "Return multiplication data plus a suggested follow-up prompt.",
            Operation::Divide => "Return division data plus a suggested follow-up prompt.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_execute_matches_data_result() {
        let prompted = PromptServer.execute(Operation::Add, 1.0, 4.0).unwrap();
        let plain = MathResult::evaluate(Operation::Add, 1.0, 4.0).unwrap();

        assert_eq!(prompted.operation, plain.operation);
        assert_eq!(prompted.inputs, plain.inputs);
        assert_eq!(prompted.result, plain.result);
    }

    #[test]
    fn test_next_prompt_mentions_result() {
        for (operation, left, right, expected) in [
            (Operation::Add, 1.0, 4.0, 5.0),
            (Operation::Subtract, 8.0, 2.0, 6.0),
            (Operation::Multiply, 5.0, 2.0, 10.0),
            (Operation::Divide, 12.0, 3.0, 4.0),
        ] {
            let prompted = PromptServer.execute(operation, left, right).unwrap();
            assert!(!prompted.next_prompt.is_empty());
            assert!(prompted.next_prompt.contains(&expected.to_string()));
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let first = PromptServer.execute(Operation::Multiply, 5.0, 2.0).unwrap();
        let second = PromptServer.execute(Operation::Multiply, 5.0, 2.0).unwrap();
        assert_eq!(first.next_prompt, second.next_prompt);
    }

    #[test]
    fn test_call_uses_prompt_tool_names() {
        let payload = PromptServer
            .call("math_add_with_prompt", &json!({"augend": 1, "addend": 4}))
            .unwrap();
        assert_eq!(payload["result"], json!(5.0));
        assert!(payload["next_prompt"].as_str().unwrap().contains("addition"));

        // Plain data tool names are not served here
        let err = PromptServer
            .call("math_add", &json!({"augend": 1, "addend": 4}))
            .unwrap_err();
        assert!(matches!(err, McpMathError::UnknownTool(_)));
    }

    #[test]
    fn test_call_divide_by_zero() {
        let err = PromptServer
            .call("math_divide_with_prompt", &json!({"dividend": 1, "divisor": 0}))
            .unwrap_err();
        assert!(matches!(err, McpMathError::DivisionByZero));
    }
}
