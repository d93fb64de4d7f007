//! Axum-based HTTP server for the gateway.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use recetario_core::{
    types::{TranslateRequest, TranslateResponse},
    Result,
};

use crate::recipes::RecipeSearchClient;
use crate::translate::{TranslateJob, TranslateService};

/// Response header naming what resolved a translation batch.
pub const PROVIDER_HEADER: &str = "X-Translate-Provider";
/// Request header forcing fresh lookups, equivalent to `?bypassCache=1`.
pub const BYPASS_HEADER: &str = "X-Bypass-Cache";

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Enable CORS.
    pub enable_cors: bool,
    /// Enable request tracing.
    pub enable_tracing: bool,
    /// Target language used when a request does not name one.
    pub default_target: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
            enable_tracing: true,
            default_target: "es".to_string(),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Translation service.
    pub translator: Arc<TranslateService>,
    /// Recipe search proxy, absent when credentials are missing.
    pub recipes: Option<Arc<RecipeSearchClient>>,
    /// Fallback target language.
    pub default_target: String,
}

/// Gateway server.
pub struct GatewayServer {
    config: GatewayConfig,
    state: Arc<AppState>,
}

impl GatewayServer {
    /// Create a new gateway server.
    pub fn new(config: GatewayConfig, translator: Arc<TranslateService>) -> Self {
        let default_target = config.default_target.clone();
        Self {
            config,
            state: Arc::new(AppState {
                translator,
                recipes: None,
                default_target,
            }),
        }
    }

    /// Set the recipe search client.
    pub fn with_recipes(mut self, recipes: Arc<RecipeSearchClient>) -> Self {
        Arc::get_mut(&mut self.state).unwrap().recipes = Some(recipes);
        self
    }

    /// Build the Axum router.
    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/api/translate", post(translate_handler))
            .route("/api/recipes", get(recipes_handler))
            .with_state(self.state.clone());

        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.enable_tracing {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| recetario_core::Error::gateway(format!("Failed to bind: {}", e)))?;

        tracing::info!(addr = %addr, "Gateway server starting");

        axum::serve(listener, self.build_router())
            .await
            .map_err(|e| recetario_core::Error::gateway(format!("Server error: {}", e)))?;

        Ok(())
    }
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Query parameters of the translate endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TranslateQuery {
    /// `bypassCache=1` skips cache lookups.
    #[serde(rename = "bypassCache")]
    pub bypass_cache: Option<String>,
    /// Debug override: provider to try first.
    pub provider: Option<String>,
}

/// Query parameters of the recipe search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

/// Recipe list response.
#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    pub recipes: Vec<recetario_core::types::Recipe>,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Translation handler.
///
/// Total fail-soft: whatever the body looks like, the response is 200
/// with one output per parsed input. Translation failures degrade to the
/// original text; only a wrong HTTP method produces a non-200 (405 from
/// the method router, with an `Allow: POST` header).
async fn translate_handler(
    State(state): State<Arc<AppState>>,
    query: Option<Query<TranslateQuery>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let query = query.map(|Query(q)| q).unwrap_or_default();

    // Lenient parse: a malformed body behaves like an empty request.
    let request: TranslateRequest = serde_json::from_slice(&body).unwrap_or_default();

    let bypass_cache = query.bypass_cache.as_deref() == Some("1")
        || headers
            .get(BYPASS_HEADER)
            .and_then(|value| value.to_str().ok())
            == Some("1");

    let job = TranslateJob {
        items: request.items(),
        target: request
            .target
            .clone()
            .unwrap_or_else(|| state.default_target.clone()),
        prefer: query.provider.clone().or_else(|| request.prefer.clone()),
        bypass_cache,
    };

    tracing::debug!(
        items = job.items.len(),
        target = %job.target,
        bypass_cache = job.bypass_cache,
        "translate request"
    );

    let outcome = state.translator.translate(job).await;

    (
        StatusCode::OK,
        [(PROVIDER_HEADER, outcome.source.as_str().to_string())],
        Json(TranslateResponse {
            translations: outcome.translations,
        }),
    )
}

/// Recipe search handler.
async fn recipes_handler(
    State(state): State<Arc<AppState>>,
    query: Option<Query<RecipeQuery>>,
) -> Response {
    let query = query.map(|Query(q)| q).unwrap_or_default();

    let Some(client) = &state.recipes else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "recipe search credentials not configured".to_string(),
            }),
        )
            .into_response();
    };

    let search = query.q.as_deref().unwrap_or("").trim();
    match client.search(search, query.limit).await {
        Ok(recipes) => (StatusCode::OK, Json(RecipeListResponse { recipes })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "recipe search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "recipe search failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}
