//! Translation orchestration.
//!
//! Partitions a batch into cache hits and misses, walks the provider
//! chain under per-attempt timeouts, and degrades to returning the input
//! unchanged when every provider is exhausted. Infallible by design:
//! translation is an enhancement and must never break the caller's
//! primary flow.

use std::time::Duration;
use tokio::time::timeout;

use recetario_core::{Error, TranslationSource};
use recetario_translate::{health, HealthTracker, ProviderEntry};

use crate::cache::{CacheStats, TranslationCache};

/// One gateway translation job.
#[derive(Debug, Clone, Default)]
pub struct TranslateJob {
    /// Source strings, duplicates permitted. Output mirrors this order.
    pub items: Vec<String>,
    /// Target language code.
    pub target: String,
    /// Provider to try first, when it names a configured provider.
    pub prefer: Option<String>,
    /// Skip cache lookups (results are still written through).
    pub bypass_cache: bool,
}

/// Outcome of a translation job. `translations` has the same length and
/// order as the job's `items`.
#[derive(Debug, Clone)]
pub struct TranslateOutcome {
    pub translations: Vec<String>,
    pub source: TranslationSource,
}

/// Process-wide translation service: provider chain, health tracker, and
/// response cache, constructed once and shared across requests.
pub struct TranslateService {
    providers: Vec<ProviderEntry>,
    health: HealthTracker,
    cache: TranslationCache,
    attempt_timeout: Duration,
}

impl TranslateService {
    pub fn new(
        providers: Vec<ProviderEntry>,
        cache_capacity: usize,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            providers,
            health: HealthTracker::new(),
            cache: TranslationCache::new(cache_capacity),
            attempt_timeout,
        }
    }

    /// Translate a batch. Never fails: when every provider is exhausted
    /// the original texts come back unchanged under the `identity` tag.
    pub async fn translate(&self, job: TranslateJob) -> TranslateOutcome {
        if job.items.is_empty() {
            return TranslateOutcome {
                translations: Vec::new(),
                source: TranslationSource::Empty,
            };
        }

        let mut out: Vec<Option<String>> = vec![None; job.items.len()];
        let mut needed: Vec<(usize, String)> = Vec::new();
        for (i, text) in job.items.iter().enumerate() {
            let hit = if job.bypass_cache {
                None
            } else {
                self.cache.get(&job.target, text)
            };
            match hit {
                Some(translation) => out[i] = Some(translation),
                None => needed.push((i, text.clone())),
            }
        }

        if needed.is_empty() {
            return TranslateOutcome {
                translations: out.into_iter().map(Option::unwrap_or_default).collect(),
                source: TranslationSource::Cache,
            };
        }

        let need_texts: Vec<String> = needed.iter().map(|(_, text)| text.clone()).collect();
        let (translated, source) = self
            .run_chain(&need_texts, &job.target, job.prefer.as_deref())
            .await;

        for ((i, original), translation) in needed.iter().zip(translated) {
            // Identity results are never cached, so a later request can
            // still attempt a real translation.
            if source != TranslationSource::Identity {
                self.cache.put(&job.target, original, &translation);
            }
            out[*i] = Some(translation);
        }

        TranslateOutcome {
            translations: out.into_iter().map(Option::unwrap_or_default).collect(),
            source,
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Configured priority order, preferred provider moved to the front,
    /// then healthy providers before cooling-down ones (stable within
    /// each group). Cooling-down providers stay in the list as a last
    /// resort.
    fn try_order(&self, prefer: Option<&str>) -> Vec<&ProviderEntry> {
        let mut order: Vec<&ProviderEntry> = self.providers.iter().collect();

        if let Some(prefer) = prefer {
            if let Some(pos) = order.iter().position(|entry| entry.name() == prefer) {
                let preferred = order.remove(pos);
                order.insert(0, preferred);
            }
        }

        let (healthy, cooling): (Vec<_>, Vec<_>) = order
            .into_iter()
            .partition(|entry| self.health.is_healthy(entry.name()));
        healthy.into_iter().chain(cooling).collect()
    }

    async fn run_chain(
        &self,
        texts: &[String],
        target: &str,
        prefer: Option<&str>,
    ) -> (Vec<String>, TranslationSource) {
        for entry in self.try_order(prefer) {
            let name = entry.name();

            let attempt = timeout(self.attempt_timeout, entry.client.translate(texts, target)).await;
            let result = match attempt {
                Ok(result) => result,
                Err(_) => Err(Error::timeout(format!(
                    "{name}: no answer within {}ms",
                    self.attempt_timeout.as_millis()
                ))),
            };

            match result {
                Ok(translated) if translated.len() != texts.len() => {
                    tracing::warn!(
                        provider = name,
                        got = translated.len(),
                        expected = texts.len(),
                        "provider broke batch shape"
                    );
                    self.health.mark_failure(name, entry.failure_backoff);
                }
                Ok(translated) if is_ineffective(texts, &translated) => {
                    tracing::warn!(provider = name, "provider echoed its input, skipping");
                    self.health.mark_failure(name, entry.failure_backoff);
                }
                Ok(translated) => {
                    self.health.mark_success(name);
                    tracing::debug!(provider = name, items = texts.len(), "batch translated");
                    return (translated, TranslationSource::Provider(name.to_string()));
                }
                Err(e) => {
                    let backoff = match e {
                        Error::ProviderQuota { .. } => health::QUOTA_BACKOFF,
                        _ => entry.failure_backoff,
                    };
                    tracing::warn!(provider = name, error = %e, "provider attempt failed");
                    self.health.mark_failure(name, backoff);
                }
            }
        }

        tracing::warn!(
            items = texts.len(),
            "all providers exhausted, returning input unchanged"
        );
        (texts.to_vec(), TranslationSource::Identity)
    }
}

/// A successful response whose every output matches its input, ignoring
/// case and whitespace, signals a misconfigured or no-op provider and is
/// treated as a failure.
fn is_ineffective(inputs: &[String], outputs: &[String]) -> bool {
    !inputs.is_empty()
        && inputs
            .iter()
            .zip(outputs)
            .all(|(input, output)| normalize(input) == normalize(output))
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
