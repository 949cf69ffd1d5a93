/*!
 * Tests for app configuration functionality
 */

use anyhow::Result;
use std::str::FromStr;

use texproof::app_config::{Config, CorrectionProvider, LogLevel, ProviderConfig};

use crate::common;

/// Test that a missing config file is created with the defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaultConfig() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("conf.json");
    let config_path_str = config_path.to_string_lossy().to_string();

    let config = Config::load_or_create(&config_path_str)?;

    assert!(config_path.exists());
    assert_eq!(config.server.listen_addr, "0.0.0.0:8000");
    assert_eq!(config.server.static_dir, "static");
    assert_eq!(config.correction.provider, CorrectionProvider::OpenRouter);
    assert_eq!(config.log_level, LogLevel::Info);

    // Loading again reads the written file back
    let reloaded = Config::load_or_create(&config_path_str)?;
    assert_eq!(reloaded.correction.available_providers.len(), 4);
    assert_eq!(reloaded.correction.common.max_tokens, 800);

    Ok(())
}

/// Test that a partial config file gets defaults for everything it omits
#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "server": { "listen_addr": "127.0.0.1:9000" },
            "correction": {
                "provider": "ollama",
                "available_providers": [
                    { "type": "ollama", "model": "", "endpoint": "http://gpu-box:11434" }
                ],
                "common": { "temperature": 0.3 }
            },
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::load_or_create(&config_path.to_string_lossy())?;

    assert_eq!(config.server.listen_addr, "127.0.0.1:9000");
    assert_eq!(config.server.static_dir, "static");
    assert_eq!(config.correction.provider, CorrectionProvider::Ollama);
    assert_eq!(config.correction.common.temperature, 0.3);
    assert_eq!(config.correction.common.max_tokens, 800);
    assert_eq!(config.correction.common.rate_limit_delay_ms, 1000);
    assert_eq!(config.log_level, LogLevel::Debug);

    // Empty model falls back to the provider default
    assert_eq!(config.correction.get_model(CorrectionProvider::Ollama), "llama3.2:3b");
    assert_eq!(config.correction.get_endpoint(CorrectionProvider::Ollama), "http://gpu-box:11434");
    assert_eq!(config.correction.get_timeout_secs(CorrectionProvider::Ollama), 60);

    config.validate()?;
    assert_eq!(config.listen_addr()?.port(), 9000);

    Ok(())
}

/// Test that a malformed config file is reported instead of replaced
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    let result = Config::load_or_create(&config_path.to_string_lossy());

    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&config_path)?, "{ not json");
    Ok(())
}

#[test]
fn test_validate_withDefaultConfig_shouldPassWithoutApiKey() {
    common::init_logging();
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.correction.common.temperature = 2.5;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.correction.common.max_tokens = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.server.listen_addr = "localhost-ish".to_string();
    assert!(config.validate().is_err());
    assert!(config.listen_addr().is_err());

    let mut config = Config::default();
    config.correction.provider_config_mut(CorrectionProvider::Ollama).endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    let mut unknown = ProviderConfig::new(CorrectionProvider::Mock);
    unknown.provider_type = "lmstudio".to_string();
    config.correction.available_providers.push(unknown);
    assert!(config.validate().is_err());
}

#[test]
fn test_provider_fromStr_withAnyCase_shouldParse() {
    assert_eq!(CorrectionProvider::from_str("openrouter").unwrap(), CorrectionProvider::OpenRouter);
    assert_eq!(CorrectionProvider::from_str("OpenAI").unwrap(), CorrectionProvider::OpenAI);
    assert_eq!(CorrectionProvider::from_str(" ANTHROPIC ").unwrap(), CorrectionProvider::Anthropic);
    assert_eq!(CorrectionProvider::from_str("Ollama").unwrap(), CorrectionProvider::Ollama);
    assert_eq!(CorrectionProvider::from_str("mock").unwrap(), CorrectionProvider::Mock);
    assert!(CorrectionProvider::from_str("gpt").is_err());
    assert!(CorrectionProvider::from_str("").is_err());
}

#[test]
fn test_provider_display_shouldRoundTripThroughFromStr() {
    for provider in CorrectionProvider::ALL {
        let name = provider.to_string();
        assert_eq!(name, name.to_lowercase());
        assert_eq!(CorrectionProvider::from_str(&name).unwrap(), provider);
    }
    assert_eq!(CorrectionProvider::OpenRouter.display_name(), "OpenRouter");
}

#[test]
fn test_provider_requiresApiKey_shouldOnlyMatchHostedProviders() {
    assert!(CorrectionProvider::OpenRouter.requires_api_key());
    assert!(CorrectionProvider::OpenAI.requires_api_key());
    assert!(CorrectionProvider::Anthropic.requires_api_key());
    assert!(!CorrectionProvider::Ollama.requires_api_key());
    assert!(!CorrectionProvider::Mock.requires_api_key());
}

#[test]
fn test_provider_config_mut_withMissingProvider_shouldInsertDefaults() {
    let mut config = Config::default();
    assert!(config.correction.get_provider_config(CorrectionProvider::Mock).is_none());

    config.correction.provider_config_mut(CorrectionProvider::Mock).model = "scripted".to_string();

    let mock = config.correction.get_provider_config(CorrectionProvider::Mock).unwrap();
    assert_eq!(mock.provider_type, "mock");
    assert_eq!(mock.model, "scripted");
    assert_eq!(config.correction.available_providers.len(), 5);

    // Editing an existing entry does not add another one
    config.correction.provider_config_mut(CorrectionProvider::OpenAI).api_key = "sk-test".to_string();
    assert_eq!(config.correction.available_providers.len(), 5);
    assert_eq!(config.correction.get_api_key(CorrectionProvider::OpenAI), "sk-test");
}

#[test]
fn test_getters_withMissingProvider_shouldReturnDefaults() {
    let mut config = Config::default();
    config.correction.available_providers.clear();

    assert_eq!(config.correction.get_model(CorrectionProvider::OpenAI), "gpt-4o-mini");
    assert_eq!(config.correction.get_endpoint(CorrectionProvider::Anthropic), "https://api.anthropic.com");
    assert_eq!(config.correction.get_api_key(CorrectionProvider::OpenRouter), "");
    assert_eq!(config.correction.get_timeout_secs(CorrectionProvider::Ollama), 60);
}

#[test]
fn test_log_level_toLevelFilter_shouldMatch() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}

#[test]
fn test_get_provider_config_withMixedCaseType_shouldMatchEntry() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "correction": {
                "provider": "openrouter",
                "available_providers": [
                    { "type": " OpenRouter ", "model": "meta/llama", "api_key": "sk-or-test" }
                ]
            }
        }"#,
    )?;

    let mut config = Config::load_or_create(&config_path.to_string_lossy())?;
    config.validate()?;

    assert_eq!(config.correction.get_api_key(CorrectionProvider::OpenRouter), "sk-or-test");
    assert_eq!(config.correction.get_model(CorrectionProvider::OpenRouter), "meta/llama");

    // Editing through the mutable accessor reuses the same entry
    config.correction.provider_config_mut(CorrectionProvider::OpenRouter).model = "other".to_string();
    assert_eq!(config.correction.available_providers.len(), 1);
    assert_eq!(config.correction.get_model(CorrectionProvider::OpenRouter), "other");

    let registry = texproof::proofreading::CorrectorRegistry::from_config(&config.correction);
    assert!(registry.available().contains(&CorrectionProvider::OpenRouter));

    Ok(())
}
