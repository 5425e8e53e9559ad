//! Tool descriptors and manifest rendering
//!
//! Each server advertises its operations as descriptors with an ordered
//! parameter schema. Descriptors are immutable once built and are the only
//! thing the capability server ever returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single named parameter in a tool's schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
}

/// Describes one callable operation exposed by a server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name, e.g. `math_add`
    pub name: String,
    /// Human-readable description for clients and the planner
    pub description: String,
    /// Ordered parameter schema
    pub params: Vec<ParamSpec>,
}

impl ToolDescriptor {
    /// Create a descriptor with no parameters
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Append a required parameter
    pub fn with_param(mut self, name: impl Into<String>, param_type: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            param_type: param_type.into(),
            required: true,
        });
        self
    }

    /// Append an optional parameter
    pub fn with_optional_param(mut self, name: impl Into<String>, param_type: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            param_type: param_type.into(),
            required: false,
        });
        self
    }

    /// Render the parameter list as a JSON schema object
    pub fn input_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &self.params {
            properties.insert(
                param.name.clone(),
                serde_json::json!({ "type": param.param_type }),
            );
            if param.required {
                required.push(Value::String(param.name.clone()));
            }
        }

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }
}

/// Render descriptors as the manifest block fed to the planner prompt
pub fn format_manifest(descriptors: &[ToolDescriptor]) -> String {
    descriptors
        .iter()
        .map(|descriptor| {
            format!(
                "- {}: {}\n  Parameters: {}",
                descriptor.name,
                descriptor.description,
                descriptor.input_schema()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ToolDescriptor {
        ToolDescriptor::new("math_add", "Return the sum of augend and addend.")
            .with_param("augend", "number")
            .with_param("addend", "number")
    }

    #[test]
    fn test_descriptor_builder() {
        let descriptor = sample();
        assert_eq!(descriptor.name, "math_add");
        assert_eq!(descriptor.params.len(), 2);
        assert!(descriptor.params.iter().all(|p| p.required));
    }

    #[test]
    fn test_optional_param() {
        let descriptor = ToolDescriptor::new("solve_math_problem", "Solve a word problem.")
            .with_param("problem", "string")
            .with_optional_param("model", "string");

        let schema = descriptor.input_schema();
        assert_eq!(schema["required"], serde_json::json!(["problem"]));
        assert!(schema["properties"]["model"].is_object());
    }

    #[test]
    fn test_input_schema_shape() {
        let schema = sample().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["augend"]["type"], "number");
        assert_eq!(schema["required"], serde_json::json!(["augend", "addend"]));
    }

    #[test]
    fn test_format_manifest_lists_every_tool() {
        let descriptors = vec![
            sample(),
            ToolDescriptor::new("math_divide", "Divide dividend by divisor.")
                .with_param("dividend", "number")
                .with_param("divisor", "number"),
        ];

        let manifest = format_manifest(&descriptors);
        assert!(manifest.contains("- math_add:"));
        assert!(manifest.contains("- math_divide:"));
        assert!(manifest.contains("Parameters:"));
    }

    #[test]
    fn test_descriptor_serialization_roundtrip() {
        let descriptor = sample();
        let json = serde_json::to_string(&descriptor).unwrap();
        let restored: ToolDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(descriptor, restored);
    }
}
