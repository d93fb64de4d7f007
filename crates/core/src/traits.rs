//! Translation provider interface.

use async_trait::async_trait;

use crate::error::Result;

/// An external translation backend reachable over HTTP.
///
/// Implementations must return exactly one output per input, in input
/// order, or fail the whole batch. Per-item degradation (keeping the
/// original text for a single failed item) is an implementation choice
/// for providers that only accept one string per call.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Stable identifier used for health tracking, the `prefer` hint,
    /// and the `X-Translate-Provider` response header.
    fn name(&self) -> &'static str;

    /// Translate a batch of strings into the `target` language.
    async fn translate(&self, texts: &[String], target: &str) -> Result<Vec<String>>;
}
