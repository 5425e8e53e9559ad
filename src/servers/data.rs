//! Data-providing server
//!
//! Executes arithmetic operations and returns structured JSON payloads
//! that other agents can reason over.

use serde_json::Value;

use crate::error::{McpMathError, Result};
use crate::math::{MathResult, Operation};
use crate::servers::require_number;
use crate::tools::ToolDescriptor;

/// Executing server returning raw structured results
pub struct DataServer;

impl DataServer {
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        Operation::ALL
            .iter()
            .map(|operation| {
                let (left, right) = operation.operand_names();
                ToolDescriptor::new(operation.tool_name(), Self::describe(*operation))
                    .with_param(left, "number")
                    .with_param(right, "number")
            })
            .collect()
    }

    /// Run one operation with typed operands
    pub fn execute(&self, operation: Operation, left: f64, right: f64) -> Result<MathResult> {
        MathResult::evaluate(operation, left, right)
    }

    /// JSON tool-call entry point used by the planner
    pub fn call(&self, tool: &str, args: &Value) -> Result<Value> {
        let operation = Operation::ALL
            .into_iter()
            .find(|operation| operation.tool_name() == tool)
            .ok_or_else(|| McpMathError::UnknownTool(tool.to_string()))?;

        let (left_name, right_name) = operation.operand_names();
        let left = require_number(args, tool, left_name)?;
        let right = require_number(args, tool, right_name)?;

        let result = self.execute(operation, left, right)?;
        Ok(serde_json::to_value(result)?)
    }

    fn describe(operation: Operation) -> &'static str {
        match operation {
            Operation::Add => "Return the sum of augend and addend as structured data.",
            Operation::Subtract => "Return minuend - subtrahend as structured data.",
            Operation::Multiply => "Return multiplicand * multiplier as structured data.",
            Operation::Divide => "Return dividend / divisor as structured data.",
        }
    }
}
