//! Per-provider cooldown tracking.
//!
//! A failure opens a cooldown window during which the provider is
//! deprioritized. The window is advisory: the gateway sorts cooling-down
//! providers after healthy ones but never removes them from the try
//! list, so there is always a last resort.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Backoff applied when a provider reports quota exhaustion or rate
/// limiting, regardless of its configured default.
pub const QUOTA_BACKOFF: Duration = Duration::from_secs(60 * 60);

/// Longest cooldown a single failure may open.
pub const MAX_BACKOFF: Duration = Duration::from_secs(60 * 60);

/// Tracks an `unavailable_until` instant per provider.
///
/// State lives for the process lifetime only. Updates are idempotent
/// key/value writes; races between concurrent requests at most produce a
/// slightly stale try-order.
#[derive(Debug, Default)]
pub struct HealthTracker {
    unavailable_until: DashMap<String, Instant>,
}

impl HealthTracker {
    pub fn new() -> Self {
        Self {
            unavailable_until: DashMap::new(),
        }
    }

    /// A provider is healthy once its cooldown window has elapsed.
    pub fn is_healthy(&self, provider: &str) -> bool {
        match self.unavailable_until.get(provider) {
            Some(until) => Instant::now() >= *until,
            None => true,
        }
    }

    /// Open a cooldown window for `provider`, capped at [`MAX_BACKOFF`].
    pub fn mark_failure(&self, provider: &str, backoff: Duration) {
        let backoff = backoff.min(MAX_BACKOFF);
        self.unavailable_until
            .insert(provider.to_string(), Instant::now() + backoff);
        tracing::warn!(
            provider,
            backoff_secs = backoff.as_secs(),
            "provider cooldown opened"
        );
    }

    /// Close the cooldown window immediately.
    pub fn mark_success(&self, provider: &str) {
        self.unavailable_until.remove(provider);
    }
}
