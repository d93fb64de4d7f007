//! Translation provider clients.
//!
//! Each client adapts one upstream API to the uniform
//! [`TranslationProvider`] batch contract. DeepL accepts a whole batch
//! per call; LibreTranslate and MyMemory take one string per call, so
//! their batches are sequential loops with per-item degradation to the
//! original text.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use recetario_core::{traits::TranslationProvider, Error, Result};

/// DeepL statuses meaning "no credit left or wrong API host" (403
/// authorization/quota, 456 quota exceeded). These open the long quota
/// cooldown instead of the provider default.
const DEEPL_QUOTA_STATUSES: [u16; 2] = [403, 456];

// =============================================================================
// DeepL (primary, batch-capable)
// =============================================================================

pub struct DeeplProvider {
    http: reqwest::Client,
    api_key: Option<Secret<String>>,
    host: String,
}

impl DeeplProvider {
    pub fn new(http: reqwest::Client, api_key: Option<Secret<String>>, host: String) -> Self {
        Self { http, api_key, host }
    }
}

#[derive(Debug, Deserialize)]
struct DeeplResponse {
    #[serde(default)]
    translations: Vec<DeeplTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeeplTranslation {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl TranslationProvider for DeeplProvider {
    fn name(&self) -> &'static str {
        "deepl"
    }

    async fn translate(&self, texts: &[String], target: &str) -> Result<Vec<String>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| Error::MissingCredentials("deepl".into()))?;

        let url = format!("https://{}/v2/translate", self.host);
        let body = serde_json::json!({
            "text": texts,
            "target_lang": target.to_uppercase(),
        });

        let response = self
            .http
            .post(&url)
            .header(
                "Authorization",
                format!("DeepL-Auth-Key {}", api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::provider(format!("deepl: {e}")))?;

        let status = response.status();
        if DEEPL_QUOTA_STATUSES.contains(&status.as_u16()) {
            return Err(Error::ProviderQuota {
                provider: "deepl".into(),
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(Error::provider(format!("deepl: status {status}")));
        }

        let parsed: DeeplResponse = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("deepl: invalid response: {e}")))?;

        let translated: Vec<String> = parsed
            .translations
            .into_iter()
            .map(|t| t.text)
            .collect();

        if translated.len() != texts.len() {
            return Err(Error::BatchShapeMismatch {
                provider: "deepl".into(),
                got: translated.len(),
                expected: texts.len(),
            });
        }

        Ok(translated)
    }
}

// =============================================================================
// LibreTranslate (community fallback, one string per call)
// =============================================================================

pub struct LibreProvider {
    http: reqwest::Client,
    endpoint: String,
}

impl LibreProvider {
    pub fn new(http: reqwest::Client, endpoint: String) -> Self {
        Self { http, endpoint }
    }

    async fn translate_one(&self, text: &str, target: &str) -> Result<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "q": text,
                "source": "auto",
                "target": target,
                "format": "text",
            }))
            .send()
            .await
            .map_err(|e| Error::provider(format!("libre: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::provider(format!(
                "libre: status {}",
                response.status()
            )));
        }

        let parsed: LibreResponse = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("libre: invalid response: {e}")))?;

        parsed
            .translated_text
            .ok_or_else(|| Error::provider("libre: missing translatedText"))
    }
}

#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

#[async_trait]
impl TranslationProvider for LibreProvider {
    fn name(&self) -> &'static str {
        "libre"
    }

    async fn translate(&self, texts: &[String], target: &str) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            match self.translate_one(text, target).await {
                Ok(translated) => out.push(translated),
                Err(e) => {
                    // Item-level degradation: keep the original line rather
                    // than failing the whole batch.
                    tracing::debug!(error = %e, "libre item failed, keeping original");
                    out.push(text.clone());
                }
            }
        }
        Ok(out)
    }
}

// =============================================================================
// MyMemory (dictionary fallback, one string per call)
// =============================================================================

pub struct MyMemoryProvider {
    http: reqwest::Client,
    endpoint: String,
    source: String,
}

impl MyMemoryProvider {
    pub fn new(http: reqwest::Client, endpoint: String, source: String) -> Self {
        Self {
            http,
            endpoint,
            source,
        }
    }

    async fn translate_one(&self, text: &str, target: &str) -> Result<String> {
        let langpair = format!("{}|{}", self.source, target);
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| Error::provider(format!("mymemory: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::provider(format!(
                "mymemory: status {}",
                response.status()
            )));
        }

        let parsed: MyMemoryResponse = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("mymemory: invalid response: {e}")))?;

        parsed
            .response_data
            .and_then(|data| data.translated_text)
            .ok_or_else(|| Error::provider("mymemory: missing translatedText"))
    }
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<MyMemoryData>,
}

#[derive(Debug, Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    async fn translate(&self, texts: &[String], target: &str) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            match self.translate_one(text, target).await {
                Ok(translated) => out.push(translated),
                Err(e) => {
                    tracing::debug!(error = %e, "mymemory item failed, keeping original");
                    out.push(text.clone());
                }
            }
        }
        Ok(out)
    }
}
