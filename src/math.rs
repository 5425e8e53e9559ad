//! Arithmetic core shared by the data and prompt servers
//!
//! Defines the closed set of operations, their canonical operand names, and
//! the structured result payload returned by every math tool.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{McpMathError, Result};

/// The four arithmetic operations every math server understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// All operations, in manifest order
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Parse a REPL keyword such as `add` or `divide`
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_lowercase().as_str() {
            "add" => Some(Self::Add),
            "subtract" => Some(Self::Subtract),
            "multiply" => Some(Self::Multiply),
            "divide" => Some(Self::Divide),
            _ => None,
        }
    }

    /// Short keyword used in manual REPL commands
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Long-form operation name used in result payloads
    pub fn long_name(&self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Subtract => "subtraction",
            Self::Multiply => "multiplication",
            Self::Divide => "division",
        }
    }

    /// Tool name advertised by the capability and data servers
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::Add => "math_add",
            Self::Subtract => "math_subtract",
            Self::Multiply => "math_multiply",
            Self::Divide => "math_divide",
        }
    }

    /// Tool name advertised by the prompt helper server
    pub fn prompt_tool_name(&self) -> &'static str {
        match self {
            Self::Add => "math_add_with_prompt",
            Self::Subtract => "math_subtract_with_prompt",
            Self::Multiply => "math_multiply_with_prompt",
            Self::Divide => "math_divide_with_prompt",
        }
    }

    /// Canonical operand names, left then right
    pub fn operand_names(&self) -> (&'static str, &'static str) {
        match self {
            Self::Add => ("augend", "addend"),
            Self::Subtract => ("minuend", "subtrahend"),
            Self::Multiply => ("multiplicand", "multiplier"),
            Self::Divide => ("dividend", "divisor"),
        }
    }

    /// Apply the operation to two operands
    ///
    /// Division fails with DivisionByZero when the divisor is exactly zero;
    /// every other operation is total over f64.
    pub fn apply(&self, left: f64, right: f64) -> Result<f64> {
        match self {
            Self::Add => Ok(left + right),
            Self::Subtract => Ok(left - right),
            Self::Multiply => Ok(left * right),
            Self::Divide => {
                if right == 0.0 {
                    Err(McpMathError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
        }
    }
}

/// Structured payload returned by every math tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathResult {
    /// Long-form operation name, e.g. `addition`
    pub operation: String,
    /// Numeric inputs keyed by canonical operand name
    pub inputs: BTreeMap<String, f64>,
    /// Computed numeric result
    pub result: f64,
}

impl MathResult {
    /// Run an operation and wrap its output with metadata
    pub fn evaluate(operation: Operation, left: f64, right: f64) -> Result<Self> {
        let result = operation.apply(left, right)?;
        let (left_name, right_name) = operation.operand_names();
        let mut inputs = BTreeMap::new();
        inputs.insert(left_name.to_string(), left);
        inputs.insert(right_name.to_string(), right);

        Ok(Self {
            operation: operation.long_name().to_string(),
            inputs,
            result,
        })
    }

    /// Render the inputs in operand order, e.g. `augend=2, addend=3`
    pub fn format_inputs(&self) -> String {
        let operation = Operation::ALL
            .iter()
            .find(|op| op.long_name() == self.operation);

        match operation {
            Some(op) => {
                let (left_name, right_name) = op.operand_names();
                let left = self.inputs.get(left_name).copied().unwrap_or_default();
                let right = self.inputs.get(right_name).copied().unwrap_or_default();
                format!("{}={}, {}={}", left_name, left, right_name, right)
            }
            None => self
                .inputs
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Format a numeric answer without a trailing `.0` for whole values
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
