//! Error types for Recetario.

use thiserror::Error;

/// Result type alias using Recetario's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Recetario.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Gateway Errors
    // =========================================================================
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // =========================================================================
    // Translation Provider Errors
    // =========================================================================
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    #[error("Provider {provider} quota exhausted (status {status})")]
    ProviderQuota { provider: String, status: u16 },

    #[error("Provider {provider} returned {got} translations for {expected} inputs")]
    BatchShapeMismatch {
        provider: String,
        got: usize,
        expected: usize,
    },

    // =========================================================================
    // Recipe Search Errors
    // =========================================================================
    #[error("Recipe search error: {0}")]
    RecipeSearch(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a gateway error.
    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a recipe search error.
    pub fn recipe_search(msg: impl Into<String>) -> Self {
        Self::RecipeSearch(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }
}
