use crate::persist::DEFAULT_LOG_FILE;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used for enrichment when no fallback chain is configured
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
    /// Fallback configuration for automatic provider switching
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Where saved recommendations are appended
    #[serde(default)]
    pub output: OutputConfig,
    /// Report rendering options
    #[serde(default)]
    pub render: RenderConfig,
    /// Optional TOML file replacing the compiled-in knowledge base
    #[serde(default)]
    pub kb_path: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for a specific LLM provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    pub enabled: bool,
    /// Model identifier (e.g., "claude-3-5-sonnet-20241022", "gpt-4o")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

/// Configuration for provider fallback and retry behavior
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    /// Whether fallback is enabled
    #[serde(default)]
    pub enabled: bool,
    /// Order of providers to try (first to last)
    #[serde(default)]
    pub order: Vec<String>,
    /// Number of retry attempts per provider before fallback
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Base delay between retries in milliseconds, multiplied by the attempt number
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            order: Vec::new(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Append-only log of saved recommendations
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RenderConfig {
    /// Terminal width to assume instead of detecting it
    #[serde(default)]
    pub terminal_width: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: default_providers(),
            fallback: FallbackConfig::default(),
            output: OutputConfig::default(),
            render: RenderConfig::default(),
            kb_path: None,
            timeout: default_timeout(),
        }
    }
}

const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";

// Default value functions
fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    let mut providers = HashMap::new();
    providers.insert(
        "anthropic".to_string(),
        ProviderConfig {
            enabled: true,
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        },
    );
    providers
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

fn default_timeout() -> u64 {
    60
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with PAIRINGS__ prefix
    /// 2. pairings.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: PAIRINGS__PROVIDERS__ANTHROPIC__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = with_builtin_provider()?
        // Optional config file (can be missing)
        .add_source(File::with_name("pairings").required(false))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Built-in anthropic entry; file and environment values merge into it.
fn with_builtin_provider() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("providers.anthropic.enabled", true)?
        .set_default("providers.anthropic.model", DEFAULT_ANTHROPIC_MODEL)
}

// Use double underscore for nested: PAIRINGS__OUTPUT__LOG_FILE
fn environment() -> Environment {
    Environment::with_prefix("PAIRINGS")
        .separator("__")
        .try_parsing(true)
}
