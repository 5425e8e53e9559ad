//! Configuration loading
//!
//! YAML configuration with per-section defaults, resolved from an explicit
//! path or the user config directory. Credentials are never stored here;
//! the OpenAI key is read from the environment by the LLM client.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{McpMathError, Result};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub llm: LlmConfig,
    pub chat: ChatConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            llm: LlmConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

/// Settings for the OpenAI-backed planner and autonomous reasoner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub api_base: String,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            max_tokens: 400,
            timeout_ms: 45_000,
        }
    }
}

/// REPL defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub default_server: String,
    pub show_json: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_server: "autonomous".to_string(),
            show_json: false,
        }
    }
}

impl Config {
    /// Load configuration, trying in order:
    /// 1. Explicit path (fails hard if unreadable)
    /// 2. `<config_dir>/mcp-math/config.yml`
    /// 3. Built-in defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let default_path = config_dir.join("mcp-math").join("config.yml");
            if default_path.exists() {
                match Self::load_from_file(&default_path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", default_path.display(), e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            McpMathError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.model, "gpt-4.1-mini");
        assert_eq!(config.llm.max_tokens, 400);
        assert_eq!(config.chat.default_server, "autonomous");
        assert!(!config.chat.show_json);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "llm:\n  model: gpt-4.1\nchat:\n  show_json: true").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.llm.model, "gpt-4.1");
        assert!(config.chat.show_json);
        // Untouched sections keep their defaults
        assert_eq!(config.llm.max_tokens, 400);
        assert_eq!(config.chat.default_server, "autonomous");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = PathBuf::from("/nonexistent/mcp-math.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "llm: [not, a, mapping").unwrap();

        let err = Config::load(Some(&file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, McpMathError::Config(_)));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let restored: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(restored.llm.model, config.llm.model);
        assert_eq!(restored.llm.timeout_ms, config.llm.timeout_ms);
    }
}
