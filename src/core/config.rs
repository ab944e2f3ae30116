//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.titan-chat/config.toml` unless `--config` points
//! elsewhere. The file is optional; when it is missing every setting keeps
//! its default and nothing is written to disk.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::inference::providers::titan::{DEFAULT_MODEL_ID, DEFAULT_REGION};
use crate::inference::{BedrockSettings, GenerationConfig};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub bedrock: BedrockConfig,
    #[serde(default)]
    pub generation: GenerationSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BedrockConfig {
    pub region: Option<String>,
    pub model_id: Option<String>,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GenerationSection {
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<u32>,
    pub stop_sequences: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "titan-chat.log";
pub const DEFAULT_LOG_LEVEL: &str = "debug";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub bedrock: BedrockSettings,
    pub generation: GenerationConfig,
    pub log_file: PathBuf,
    pub log_level: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.titan-chat/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".titan-chat").join("config.toml"))
}

/// Load config from `path`, or from the default location when `path` is None.
///
/// A missing file yields `ChatConfig::default()`. A file that exists but is
/// malformed returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<ChatConfig, ConfigError> {
    let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => p,
        None => {
            info!("Could not determine home directory, using default config");
            return Ok(ChatConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(ChatConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<ChatConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

// ============================================================================
// Resolution
// ============================================================================

/// CLI values that win over everything else (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_file: Option<PathBuf>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChatConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Region: env → config → default
    let region = std::env::var("TITAN_CHAT_REGION")
        .ok()
        .or_else(|| config.bedrock.region.clone())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    // Model: env → config → default
    let model_id = std::env::var("TITAN_CHAT_MODEL_ID")
        .ok()
        .or_else(|| config.bedrock.model_id.clone())
        .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

    // Endpoint override: env → config → SDK regional default
    let endpoint_url = std::env::var("TITAN_CHAT_ENDPOINT_URL")
        .ok()
        .or_else(|| config.bedrock.endpoint_url.clone());

    let defaults = GenerationConfig::default();
    let section = &config.generation;
    let generation = GenerationConfig {
        temperature: section.temperature.unwrap_or(defaults.temperature),
        top_p: section.top_p.unwrap_or(defaults.top_p),
        max_tokens: section.max_tokens.unwrap_or(defaults.max_tokens),
        stop_sequences: section
            .stop_sequences
            .clone()
            .unwrap_or(defaults.stop_sequences),
    };

    // Log file: CLI → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        bedrock: BedrockSettings {
            region,
            model_id,
            endpoint_url,
        },
        generation,
        log_file,
        log_level: config
            .logging
            .level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = ChatConfig::default();
        assert!(config.bedrock.region.is_none());
        assert!(config.generation.max_tokens.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&ChatConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.generation, GenerationConfig::default());
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ChatConfig {
            generation: GenerationSection {
                temperature: Some(0.5),
                top_p: Some(0.9),
                max_tokens: Some(512),
                stop_sequences: Some(vec!["User:".to_string()]),
            },
            logging: LoggingConfig {
                file: Some("/tmp/chat.log".to_string()),
                level: Some("warn".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.generation.temperature, 0.5);
        assert_eq!(resolved.generation.top_p, 0.9);
        assert_eq!(resolved.generation.max_tokens, 512);
        assert_eq!(resolved.generation.stop_sequences, vec!["User:"]);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/chat.log"));
        assert_eq!(resolved.log_level, "warn");
    }

    #[test]
    fn test_resolve_cli_log_file_wins() {
        let config = ChatConfig {
            logging: LoggingConfig {
                file: Some("from-config.log".to_string()),
                level: None,
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            log_file: Some(PathBuf::from("from-cli.log")),
        };
        assert_eq!(resolve(&config, &cli).log_file, PathBuf::from("from-cli.log"));
    }

    /// Serializes tests that touch the `TITAN_CHAT_*` process environment.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    const ENV_VARS: [&str; 3] = [
        "TITAN_CHAT_REGION",
        "TITAN_CHAT_MODEL_ID",
        "TITAN_CHAT_ENDPOINT_URL",
    ];

    fn file_bedrock_config() -> ChatConfig {
        ChatConfig {
            bedrock: BedrockConfig {
                region: Some("eu-west-1".to_string()),
                model_id: Some("from-file".to_string()),
                endpoint_url: Some("http://from-file:4566".to_string()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_env_vars_override_config_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        // SAFETY: ENV_LOCK keeps other tests from reading these variables concurrently
        unsafe {
            std::env::set_var("TITAN_CHAT_REGION", "us-west-2");
            std::env::set_var("TITAN_CHAT_MODEL_ID", "from-env");
            std::env::set_var("TITAN_CHAT_ENDPOINT_URL", "http://from-env:4566");
        }

        let resolved = resolve(&file_bedrock_config(), &CliOverrides::default());

        unsafe {
            for var in ENV_VARS {
                std::env::remove_var(var);
            }
        }
        assert_eq!(resolved.bedrock.region, "us-west-2");
        assert_eq!(resolved.bedrock.model_id, "from-env");
        assert_eq!(
            resolved.bedrock.endpoint_url.as_deref(),
            Some("http://from-env:4566")
        );
    }

    #[test]
    fn test_resolve_bedrock_falls_back_to_file_then_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let from_file = resolve(&file_bedrock_config(), &CliOverrides::default());
        assert_eq!(from_file.bedrock.region, "eu-west-1");
        assert_eq!(from_file.bedrock.model_id, "from-file");
        assert_eq!(
            from_file.bedrock.endpoint_url.as_deref(),
            Some("http://from-file:4566")
        );

        let defaults = resolve(&ChatConfig::default(), &CliOverrides::default());
        assert_eq!(defaults.bedrock, BedrockSettings::default());
        assert_eq!(defaults.bedrock.endpoint_url, None);
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[bedrock]
region = "us-west-2"
model_id = "amazon.titan-text-lite-v1"
endpoint_url = "http://localhost:4566"

[generation]
temperature = 0.2
max_tokens = 1024
stop_sequences = ["User:"]

[logging]
level = "info"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.bedrock.region.as_deref(), Some("us-west-2"));
        assert_eq!(
            config.bedrock.model_id.as_deref(),
            Some("amazon.titan-text-lite-v1")
        );
        assert_eq!(config.bedrock.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.generation.temperature, Some(0.2));
        assert_eq!(config.generation.top_p, None);
        assert_eq!(config.generation.max_tokens, Some(1024));
        assert_eq!(config.logging.level.as_deref(), Some("info"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config = parse_config("[generation]\nmax_tokens = 64\n").unwrap();
        assert_eq!(config.generation.max_tokens, Some(64));
        assert!(config.bedrock.region.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse_config("[generation\nmax_tokens = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/titan-chat/config.toml"))).unwrap();
        assert!(config.bedrock.model_id.is_none());
    }
}
