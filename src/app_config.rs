use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Correction (LLM) settings
    #[serde(default)]
    pub correction: CorrectionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// HTTP server settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory holding `index.html` and the other static assets
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            static_dir: default_static_dir(),
        }
    }
}

/// Correction provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionProvider {
    // @provider: OpenRouter (OpenAI-compatible)
    #[default]
    OpenRouter,
    // @provider: OpenAI
    OpenAI,
    // @provider: Anthropic
    Anthropic,
    // @provider: Ollama
    Ollama,
    // @provider: Offline echo provider
    Mock,
}

impl CorrectionProvider {
    /// Every provider, in registry order
    pub const ALL: [CorrectionProvider; 5] = [
        Self::OpenRouter,
        Self::OpenAI,
        Self::Anthropic,
        Self::Ollama,
        Self::Mock,
    ];

    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenRouter => "OpenRouter",
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Ollama => "Ollama",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenRouter => "openrouter".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }

    // @returns: Whether a hosted API key is needed
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenRouter | Self::OpenAI | Self::Anthropic)
    }
}

impl std::fmt::Display for CorrectionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for CorrectionProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openrouter" => Ok(Self::OpenRouter),
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: CorrectionProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(provider_type),
            api_key: String::new(),
            endpoint: default_endpoint(provider_type),
            timeout_secs: default_timeout_secs(),
        }
    }

    // @returns: Whether this entry configures `provider`, matching `type` like `FromStr` does
    pub fn is_for(&self, provider: CorrectionProvider) -> bool {
        self.provider_type.trim().eq_ignore_ascii_case(&provider.to_lowercase_string())
    }
}

/// Correction service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorrectionConfig {
    /// Provider used when the CLI does not pick one
    #[serde(default)]
    pub provider: CorrectionProvider,

    /// Available correction providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common correction settings
    #[serde(default)]
    pub common: CorrectionCommonConfig,
}

/// Common correction settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorrectionCommonConfig {
    /// Temperature parameter for text generation
    /// Lower values make output more deterministic
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens the model may generate per paragraph
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Delay in milliseconds imposed after each model call
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,
}

impl Default for CorrectionCommonConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    800
}

fn default_rate_limit_delay_ms() -> u64 {
    1000 // free-tier hosted models throttle hard
}

fn default_endpoint(provider: CorrectionProvider) -> String {
    match provider {
        CorrectionProvider::OpenRouter => "https://openrouter.ai/api/v1".to_string(),
        CorrectionProvider::OpenAI => "https://api.openai.com/v1".to_string(),
        CorrectionProvider::Anthropic => "https://api.anthropic.com".to_string(),
        CorrectionProvider::Ollama => "http://localhost:11434".to_string(),
        CorrectionProvider::Mock => String::new(),
    }
}

fn default_model(provider: CorrectionProvider) -> String {
    match provider {
        CorrectionProvider::OpenRouter => "google/gemma-3-27b-it:free".to_string(),
        CorrectionProvider::OpenAI => "gpt-4o-mini".to_string(),
        CorrectionProvider::Anthropic => "claude-3-haiku-20240307".to_string(),
        CorrectionProvider::Ollama => "llama3.2:3b".to_string(),
        CorrectionProvider::Mock => "mock".to_string(),
    }
}

impl Config {
    /// Load the configuration from `path`, writing a default file first if none exists
    pub fn load_or_create(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.server.listen_addr.trim().parse::<SocketAddr>()
            .map_err(|e| anyhow!("Invalid listen address '{}': {}", self.server.listen_addr, e))?;

        let common = &self.correction.common;
        if !(0.0..=2.0).contains(&common.temperature) {
            return Err(anyhow!("Temperature must be between 0.0 and 2.0, got {}", common.temperature));
        }
        if common.max_tokens == 0 {
            return Err(anyhow!("max_tokens must be greater than zero"));
        }

        for provider_config in &self.correction.available_providers {
            provider_config.provider_type.parse::<CorrectionProvider>()?;
            if !provider_config.endpoint.is_empty() {
                Url::parse(&provider_config.endpoint)
                    .map_err(|e| anyhow!("Invalid endpoint for {}: {}", provider_config.provider_type, e))?;
            }
        }

        // A missing key only disables that provider; the registry reports it
        let provider = self.correction.provider;
        if provider.requires_api_key() && self.correction.get_api_key(provider).is_empty() {
            warn!("No API key configured for default provider {}", provider.display_name());
        }

        Ok(())
    }

    /// Parsed listen address; call after `validate`
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.server.listen_addr.trim().parse()
            .map_err(|e| anyhow!("Invalid listen address '{}': {}", self.server.listen_addr, e))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig::default(),
            correction: CorrectionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl CorrectionConfig {
    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: CorrectionProvider) -> Option<&ProviderConfig> {
        self.available_providers.iter()
            .find(|p| p.is_for(provider_type))
    }

    /// Get a mutable provider configuration, inserting the defaults if missing
    pub fn provider_config_mut(&mut self, provider_type: CorrectionProvider) -> &mut ProviderConfig {
        let index = match self.available_providers.iter().position(|p| p.is_for(provider_type)) {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(provider_type));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get the model for a provider
    pub fn get_model(&self, provider: CorrectionProvider) -> String {
        self.get_provider_config(provider)
            .map(|p| p.model.clone())
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| default_model(provider))
    }

    /// Get the API key for a provider
    pub fn get_api_key(&self, provider: CorrectionProvider) -> String {
        self.get_provider_config(provider)
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for a provider
    pub fn get_endpoint(&self, provider: CorrectionProvider) -> String {
        self.get_provider_config(provider)
            .map(|p| p.endpoint.clone())
            .filter(|endpoint| !endpoint.is_empty())
            .unwrap_or_else(|| default_endpoint(provider))
    }

    /// Get the request timeout for a provider
    pub fn get_timeout_secs(&self, provider: CorrectionProvider) -> u64 {
        self.get_provider_config(provider)
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs)
    }
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            provider: CorrectionProvider::default(),
            available_providers: vec![
                ProviderConfig::new(CorrectionProvider::OpenRouter),
                ProviderConfig::new(CorrectionProvider::OpenAI),
                ProviderConfig::new(CorrectionProvider::Anthropic),
                ProviderConfig::new(CorrectionProvider::Ollama),
            ],
            common: CorrectionCommonConfig::default(),
        }
    }
}
