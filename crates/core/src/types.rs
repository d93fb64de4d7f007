//! Wire types shared between the gateway and its callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /api/translate`.
///
/// Parsed leniently: an absent or malformed body behaves like the default
/// (empty) request instead of being rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslateRequest {
    /// Batch form.
    #[serde(default)]
    pub texts: Option<Vec<String>>,
    /// Single-string form, used when `texts` is absent.
    #[serde(default)]
    pub text: Option<String>,
    /// Target language code, e.g. "es".
    #[serde(default)]
    pub target: Option<String>,
    /// Provider hint, tried first when it names a configured provider.
    #[serde(default)]
    pub prefer: Option<String>,
}

impl TranslateRequest {
    /// Flatten `texts`/`text` into one ordered list. `texts` wins when
    /// both are present; an empty `text` counts as no input.
    pub fn items(&self) -> Vec<String> {
        match (&self.texts, &self.text) {
            (Some(texts), _) => texts.clone(),
            (None, Some(text)) if !text.is_empty() => vec![text.clone()],
            _ => Vec::new(),
        }
    }
}

/// Body of a translate response. Same length and order as the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translations: Vec<String>,
}

/// Where a translation batch was resolved from. Reported verbatim in the
/// `X-Translate-Provider` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationSource {
    /// The request carried no items.
    Empty,
    /// Every item was already cached.
    Cache,
    /// The named provider produced the batch.
    Provider(String),
    /// All providers exhausted; input returned unchanged.
    Identity,
}

impl TranslationSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => "empty",
            Self::Cache => "cache",
            Self::Provider(name) => name,
            Self::Identity => "identity",
        }
    }
}

impl fmt::Display for TranslationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flattened recipe record returned by the search proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub category: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub kcal: Option<u64>,
    pub image: Option<String>,
}
