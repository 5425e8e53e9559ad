//! Capability discovery server
//!
//! Advertises the math tool manifest without ever executing anything.
//! Every execution attempt fails with a fixed advisory pointing at the
//! data provider.

use serde_json::Value;

use crate::error::{McpMathError, Result};
use crate::math::Operation;
use crate::tools::ToolDescriptor;

/// Metadata-only server demonstrating the discovery pattern
pub struct CapabilityServer;

impl CapabilityServer {
    /// Describe every advertised tool; never fails, never executes
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

    /// Refuse execution for any tool name
    pub fn call(&self, tool: &str, _args: &Value) -> Result<Value> {
        Err(McpMathError::Disabled(format!(
            "This server only exposes tool metadata. \
             Use the math-data-provider server to execute '{}'.",
            tool
        )))
    }

    fn describe(operation: Operation) -> &'static str {
        match operation {
            Operation::Add => {
                "Advertise how to sum two floats. Call the math-data-provider server \
                 with the same parameters to execute the calculation."
            }
            Operation::Subtract => "Return metadata for subtracting the subtrahend from the minuend.",
            Operation::Multiply => "Document how to multiply two factors.",
            Operation::Divide => "Explain how to divide a dividend by a non-zero divisor.",
        }
    }
}
