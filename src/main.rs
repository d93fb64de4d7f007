#![deny(unused)]
//! Recetario backend: translation gateway plus recipe search proxy.

use std::sync::Arc;
use std::time::Duration;

use secrecy::Secret;

use recetario_core::config::AppConfig;
use recetario_gateway::{
    configure_tracing, GatewayConfig, GatewayServer, RecipeSearchClient, TranslateService,
};
use recetario_translate::default_provider_chain;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    configure_tracing()?;

    tracing::info!("Starting Recetario v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        AppConfig::default()
    });

    // Environment variables from the original deployment keep working.
    if config.translate.deepl_api_key.is_none() {
        config.translate.deepl_api_key = std::env::var("DEEPL_API_KEY").ok().map(Secret::new);
    }
    if let Ok(host) = std::env::var("DEEPL_API_HOST") {
        config.translate.deepl_host = host.trim().to_string();
    }
    if let Ok(url) = std::env::var("LIBRETRANSLATE_URL") {
        config.translate.libre_url = url;
    }
    if config.recipes.app_id.is_none() {
        config.recipes.app_id = std::env::var("EDAMAM_APP_ID").ok();
    }
    if config.recipes.app_key.is_none() {
        config.recipes.app_key = std::env::var("EDAMAM_APP_KEY").ok().map(Secret::new);
    }

    let providers = default_provider_chain(&config.translate);
    tracing::info!(
        providers = providers.len(),
        deepl_configured = config.translate.deepl_api_key.is_some(),
        "provider chain initialized"
    );

    let translator = Arc::new(TranslateService::new(
        providers,
        config.translate.cache_capacity,
        Duration::from_millis(config.translate.attempt_timeout_ms),
    ));

    let gateway_config = GatewayConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        enable_cors: true,
        enable_tracing: true,
        default_target: config.translate.default_target.clone(),
    };

    let mut server = GatewayServer::new(gateway_config.clone(), translator);

    match (&config.recipes.app_id, &config.recipes.app_key) {
        (Some(app_id), Some(app_key)) => {
            let client = RecipeSearchClient::new(
                reqwest::Client::new(),
                config.recipes.base_url.clone(),
                app_id.clone(),
                app_key.clone(),
                config.recipes.default_limit,
                config.recipes.max_limit,
            );
            server = server.with_recipes(Arc::new(client));
            tracing::info!("recipe search proxy enabled");
        }
        _ => {
            tracing::warn!("EDAMAM_APP_ID / EDAMAM_APP_KEY not set, /api/recipes disabled");
        }
    }

    tracing::info!(
        host = %gateway_config.host,
        port = gateway_config.port,
        "gateway initialized"
    );

    server.run().await?;

    Ok(())
}
