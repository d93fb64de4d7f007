#![deny(unused)]
//! Translation providers for Recetario.
//!
//! This crate provides the provider clients (DeepL, LibreTranslate,
//! MyMemory) behind the uniform [`TranslationProvider`] contract, plus
//! the per-provider health tracker the gateway uses to order its
//! fallback chain.

pub mod health;
pub mod providers;

pub use health::HealthTracker;
pub use providers::{DeeplProvider, LibreProvider, MyMemoryProvider};

use std::sync::Arc;
use std::time::Duration;

use recetario_core::config::TranslateConfig;
use recetario_core::traits::TranslationProvider;

/// A provider plus the cooldown a generic failure of it should open.
pub struct ProviderEntry {
    pub client: Arc<dyn TranslationProvider>,
    pub failure_backoff: Duration,
}

impl ProviderEntry {
    pub fn new(client: Arc<dyn TranslationProvider>, failure_backoff: Duration) -> Self {
        Self {
            client,
            failure_backoff,
        }
    }

    pub fn name(&self) -> &'static str {
        self.client.name()
    }
}

/// Build the default provider chain, in priority order: DeepL (paid,
/// batch-capable), then LibreTranslate (community), then MyMemory
/// (dictionary lookup).
pub fn default_provider_chain(cfg: &TranslateConfig) -> Vec<ProviderEntry> {
    let http = reqwest::Client::new();

    vec![
        ProviderEntry::new(
            Arc::new(DeeplProvider::new(
                http.clone(),
                cfg.deepl_api_key.clone(),
                cfg.deepl_host.clone(),
            )),
            Duration::from_secs(cfg.deepl_backoff_secs),
        ),
        ProviderEntry::new(
            Arc::new(LibreProvider::new(http.clone(), cfg.libre_url.clone())),
            Duration::from_secs(cfg.libre_backoff_secs),
        ),
        ProviderEntry::new(
            Arc::new(MyMemoryProvider::new(
                http,
                cfg.mymemory_url.clone(),
                cfg.mymemory_source.clone(),
            )),
            Duration::from_secs(cfg.mymemory_backoff_secs),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chain_priority_order() {
        let chain = default_provider_chain(&TranslateConfig {
            attempt_timeout_ms: 2000,
            cache_capacity: 10,
            default_target: "es".into(),
            deepl_api_key: None,
            deepl_host: "api-free.deepl.com".into(),
            deepl_backoff_secs: 900,
            libre_url: "https://libretranslate.com/translate".into(),
            libre_backoff_secs: 300,
            mymemory_url: "https://api.mymemory.translated.net/get".into(),
            mymemory_source: "en".into(),
            mymemory_backoff_secs: 300,
        });

        let names: Vec<_> = chain.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["deepl", "libre", "mymemory"]);
    }
}
