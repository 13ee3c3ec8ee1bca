//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.parley/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::inference::WELCOME_MESSAGE;
use crate::inference::providers::DEFAULT_OPENAI_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub model: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub welcome_message: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model_name: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub welcome_message: String,
    /// None when no non-empty key was found anywhere.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
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

/// Returns the path to `~/.parley/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parley").join("config.toml"))
}

/// Load config from `~/.parley/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ParleyConfig::default()`.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(ParleyConfig::default());
    };
    load_config_from(&path)
}

/// Load config from an explicit path. Malformed files are `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<ParleyConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ParleyConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ParleyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config model={:?}", config.general.model);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Parley Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# model = "gpt-3.5-turbo"            # Or set PARLEY_MODEL / pass --model
# max_output_tokens = 1000
# temperature = 0.7
# welcome_message = "Hello! I'm your AI assistant. How can I help you today?"

# [openai]
# api_key = "sk-..."                 # Or set OPENAI_API_KEY env var
# base_url = "https://api.openai.com/v1"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Where environment lookups come from. Split out so resolution is testable
/// without touching the process environment.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Treats unset and blank values alike, so `KEY=` in `.env` falls through.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ParleyConfig, cli_model: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_model, &ProcessEnv)
}

pub fn resolve_with_env(
    config: &ParleyConfig,
    cli_model: Option<&str>,
    env: &dyn EnvSource,
) -> ResolvedConfig {
    // Model: CLI → env → config → default
    let model_name = cli_model
        .map(|s| s.to_string())
        .or_else(|| non_blank(env.var("PARLEY_MODEL")))
        .or_else(|| non_blank(config.general.model.clone()))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // API key: env → config, blank values skipped at each layer
    let openai_api_key = non_blank(env.var("OPENAI_API_KEY"))
        .or_else(|| non_blank(config.openai.api_key.clone()));

    // Base URL: env → config → default
    let openai_base_url = non_blank(env.var("OPENAI_BASE_URL"))
        .or_else(|| non_blank(config.openai.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

    if openai_api_key.is_none() {
        warn!("No OpenAI API key configured; requests are disabled");
    }

    ResolvedConfig {
        model_name,
        max_output_tokens: config
            .general
            .max_output_tokens
            .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
        temperature: config.general.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        welcome_message: config
            .general
            .welcome_message
            .clone()
            .unwrap_or_else(|| WELCOME_MESSAGE.to_string()),
        openai_api_key,
        openai_base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for FakeEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    fn empty_env() -> FakeEnv {
        FakeEnv(HashMap::new())
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = ParleyConfig::default();
        let resolved = resolve_with_env(&config, None, &empty_env());
        assert_eq!(resolved.model_name, DEFAULT_MODEL);
        assert_eq!(resolved.max_output_tokens, 1000);
        assert!((resolved.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(resolved.welcome_message, WELCOME_MESSAGE);
        assert_eq!(resolved.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert!(resolved.openai_api_key.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ParleyConfig {
            general: GeneralConfig {
                model: Some("gpt-4o-mini".to_string()),
                max_output_tokens: Some(256),
                temperature: Some(0.2),
                welcome_message: Some("Hi there.".to_string()),
            },
            openai: OpenAiConfig {
                api_key: Some("sk-file".to_string()),
                base_url: Some("http://localhost:1234/v1".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, None, &empty_env());
        assert_eq!(resolved.model_name, "gpt-4o-mini");
        assert_eq!(resolved.max_output_tokens, 256);
        assert_eq!(resolved.welcome_message, "Hi there.");
        assert_eq!(resolved.openai_api_key.as_deref(), Some("sk-file"));
        assert_eq!(resolved.openai_base_url, "http://localhost:1234/v1");
    }

    #[test]
    fn test_env_overrides_config_and_cli_overrides_env() {
        let config = ParleyConfig {
            general: GeneralConfig {
                model: Some("from-file".to_string()),
                ..Default::default()
            },
            openai: OpenAiConfig {
                api_key: Some("sk-file".to_string()),
                base_url: None,
            },
        };
        let env = FakeEnv(HashMap::from([
            ("PARLEY_MODEL", "from-env"),
            ("OPENAI_API_KEY", "sk-env"),
        ]));

        let resolved = resolve_with_env(&config, None, &env);
        assert_eq!(resolved.model_name, "from-env");
        assert_eq!(resolved.openai_api_key.as_deref(), Some("sk-env"));

        let resolved = resolve_with_env(&config, Some("from-cli"), &env);
        assert_eq!(resolved.model_name, "from-cli");
    }

    #[test]
    fn test_empty_api_key_counts_as_missing() {
        let env = FakeEnv(HashMap::from([("OPENAI_API_KEY", "  ")]));
        let resolved = resolve_with_env(&ParleyConfig::default(), None, &env);
        assert!(resolved.openai_api_key.is_none());
    }

    #[test]
    fn test_blank_env_key_falls_through_to_file() {
        let config = ParleyConfig {
            openai: OpenAiConfig {
                api_key: Some("sk-file".to_string()),
                base_url: Some("http://localhost:1234/v1".to_string()),
            },
            ..Default::default()
        };
        let env = FakeEnv(HashMap::from([
            ("OPENAI_API_KEY", ""),
            ("OPENAI_BASE_URL", " "),
            ("PARLEY_MODEL", ""),
        ]));

        let resolved = resolve_with_env(&config, None, &env);
        assert_eq!(resolved.openai_api_key.as_deref(), Some("sk-file"));
        assert_eq!(resolved.openai_base_url, "http://localhost:1234/v1");
        assert_eq!(resolved.model_name, DEFAULT_MODEL);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[general]
model = "my-model"
"#;
        let config: ParleyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.model.as_deref(), Some("my-model"));
        assert!(config.general.temperature.is_none());
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[general]
model = "gpt-4o"
max_output_tokens = 500
temperature = 1.0

[openai]
api_key = "sk-test-123"
base_url = "http://192.168.1.100:1234/v1"
"#;
        let config: ParleyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.max_output_tokens, Some(500));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test-123"));
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("parley-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.general.model.is_none());
        assert!(path.exists());

        // The generated file is all comments, so it parses back to defaults.
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.openai.api_key.is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("parley-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\nmodel = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
