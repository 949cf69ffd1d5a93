/*!
 * Named correctors, built once from configuration.
 *
 * The HTTP API selects a corrector per request by provider name. Hosted
 * providers without an API key are left out; `mock` is always available.
 */

use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{CorrectionConfig, CorrectionProvider};
use crate::errors::ProofreadError;
use crate::providers::anthropic::Anthropic;
use crate::providers::ollama::Ollama;
use crate::providers::openai::OpenAI;
use super::corrector::{CorrectionSettings, Corrector, EchoCorrector, LlmCorrector, ProviderClient};

/// Correctors keyed by provider
#[derive(Clone)]
pub struct CorrectorRegistry {
    correctors: HashMap<CorrectionProvider, Arc<dyn Corrector>>,
    default_provider: CorrectionProvider,
}

impl CorrectorRegistry {
    /// An empty registry whose blank selector resolves to `default_provider`
    pub fn new(default_provider: CorrectionProvider) -> Self {
        Self {
            correctors: HashMap::new(),
            default_provider,
        }
    }

    /// Build every usable corrector described by `config`
    pub fn from_config(config: &CorrectionConfig) -> Self {
        let mut registry = Self::new(config.provider);

        for provider in CorrectionProvider::ALL {
            if provider == CorrectionProvider::Mock {
                info!("Correction provider {} ready (offline echo)", provider.display_name());
                registry.insert(provider, Arc::new(EchoCorrector));
                continue;
            }

            match build_client(config, provider) {
                Some(client) => {
                    let settings = CorrectionSettings::from_common(config.get_model(provider), &config.common);
                    info!("Correction provider {} ready (model: {})", provider.display_name(), settings.model);
                    registry.insert(provider, Arc::new(LlmCorrector::new(client, settings)));
                }
                None => warn!(
                    "Correction provider {} disabled: no API key configured",
                    provider.display_name()
                ),
            }
        }

        registry
    }

    /// Register or replace the corrector for `provider`
    pub fn insert(&mut self, provider: CorrectionProvider, corrector: Arc<dyn Corrector>) {
        self.correctors.insert(provider, corrector);
    }

    /// Builder-style `insert`
    pub fn with(mut self, provider: CorrectionProvider, corrector: Arc<dyn Corrector>) -> Self {
        self.insert(provider, corrector);
        self
    }

    /// Provider used for a blank selector
    pub fn default_provider(&self) -> CorrectionProvider {
        self.default_provider
    }

    /// Providers with a registered corrector
    pub fn available(&self) -> Vec<CorrectionProvider> {
        CorrectionProvider::ALL.into_iter()
            .filter(|provider| self.correctors.contains_key(provider))
            .collect()
    }

    /// Look up the corrector for a provider name; blank means the default provider
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Corrector>, ProofreadError> {
        let provider = if name.trim().is_empty() {
            self.default_provider
        } else {
            name.parse::<CorrectionProvider>()
                .map_err(|_| ProofreadError::UnknownProvider(name.to_string()))?
        };

        self.correctors.get(&provider)
            .cloned()
            .ok_or_else(|| ProofreadError::ProviderUnavailable(provider.to_lowercase_string()))
    }
}

impl std::fmt::Debug for CorrectorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorrectorRegistry")
            .field("available", &self.available())
            .field("default_provider", &self.default_provider)
            .finish()
    }
}

// `None` for a hosted provider without a key, and for `mock`, which needs no client
fn build_client(config: &CorrectionConfig, provider: CorrectionProvider) -> Option<ProviderClient> {
    let api_key = config.get_api_key(provider);
    if provider.requires_api_key() && api_key.is_empty() {
        return None;
    }

    let endpoint = config.get_endpoint(provider);
    let timeout = Duration::from_secs(config.get_timeout_secs(provider));

    let client = match provider {
        CorrectionProvider::OpenRouter | CorrectionProvider::OpenAI => {
            ProviderClient::OpenAI(OpenAI::with_timeout(api_key, endpoint, timeout))
        }
        CorrectionProvider::Anthropic => {
            ProviderClient::Anthropic(Anthropic::with_timeout(api_key, endpoint, timeout))
        }
        CorrectionProvider::Ollama => ProviderClient::Ollama(Ollama::from_url(endpoint, timeout)),
        CorrectionProvider::Mock => return None,
    };

    Some(client)
}
