//! Error types for the MCP math servers
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur across the servers, planner, and REPL
#[derive(Debug, Error)]
pub enum McpMathError {
    /// No blueprint matches the requested server name or alias
    #[error("Unknown server '{name}'. Available: {available}")]
    ServerNotFound { name: String, available: String },

    /// Malformed manual command in the REPL
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Execution attempted against a capability-only server
    #[error("{0}")]
    Disabled(String),

    /// Division with a zero divisor
    #[error("Divisor must be non-zero")]
    DivisionByZero,

    /// Planner or caller named a tool absent from the manifest
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    /// Planner response was not a single well-formed decision object
    #[error("Malformed planner response: {0}")]
    MalformedPlannerResponse(String),

    /// Heuristic reasoner found no numeric content to work with
    #[error("Could not extract any numbers from problem: {0}")]
    UnparseableProblem(String),

    /// Missing or invalid configuration (credentials, config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM API error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, McpMathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_not_found_error() {
        let err = McpMathError::ServerNotFound {
            name: "bogus".to_string(),
            available: "data, prompt".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown server 'bogus'. Available: data, prompt");
    }

    #[test]
    fn test_invalid_command_error() {
        let err = McpMathError::InvalidCommand("expected: <operation> <number> <number>".to_string());
        assert!(err.to_string().starts_with("Invalid command:"));
    }

    #[test]
    fn test_disabled_error_passthrough() {
        let err = McpMathError::Disabled("metadata only".to_string());
        assert_eq!(err.to_string(), "metadata only");
    }

    #[test]
    fn test_division_by_zero_error() {
        let err = McpMathError::DivisionByZero;
        assert_eq!(err.to_string(), "Divisor must be non-zero");
    }

    #[test]
    fn test_unknown_tool_error() {
        let err = McpMathError::UnknownTool("math_unknown".to_string());
        assert_eq!(err.to_string(), "Unknown tool 'math_unknown'");
    }

    #[test]
    fn test_malformed_planner_response_error() {
        let err = McpMathError::MalformedPlannerResponse("not JSON".to_string());
        assert!(err.to_string().contains("not JSON"));
    }

    #[test]
    fn test_unparseable_problem_error() {
        let err = McpMathError::UnparseableProblem("hello there".to_string());
        assert!(err.to_string().contains("hello there"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: McpMathError = io_err.into();
        assert!(matches!(err, McpMathError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: McpMathError = json_err.into();
        assert!(matches!(err, McpMathError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        assert!(returns_ok().is_ok());
    }
}
