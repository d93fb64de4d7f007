use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub translate: TranslateConfig,
    pub recipes: RecipeSearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranslateConfig {
    /// Upper bound on a single provider attempt.
    pub attempt_timeout_ms: u64,
    /// Response cache bound; oldest-inserted entries are evicted past it.
    pub cache_capacity: usize,
    /// Target language used when the request does not name one.
    pub default_target: String,

    pub deepl_api_key: Option<Secret<String>>,
    pub deepl_host: String,
    pub deepl_backoff_secs: u64,

    pub libre_url: String,
    pub libre_backoff_secs: u64,

    pub mymemory_url: String,
    /// MyMemory has no auto-detect langpair, so the source side is fixed.
    pub mymemory_source: String,
    pub mymemory_backoff_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipeSearchConfig {
    pub base_url: String,
    pub app_id: Option<String>,
    pub app_key: Option<Secret<String>>,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("RECETARIO_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map APP__SERVER__PORT=3000 to server.port
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 3000,
            },
            translate: TranslateConfig {
                attempt_timeout_ms: 2000,
                cache_capacity: 2000,
                default_target: "es".into(),
                deepl_api_key: None,
                deepl_host: "api-free.deepl.com".into(),
                deepl_backoff_secs: 15 * 60,
                libre_url: "https://libretranslate.com/translate".into(),
                libre_backoff_secs: 5 * 60,
                mymemory_url: "https://api.mymemory.translated.net/get".into(),
                mymemory_source: "en".into(),
                mymemory_backoff_secs: 5 * 60,
            },
            recipes: RecipeSearchConfig {
                base_url: "https://api.edamam.com/api/recipes/v2".into(),
                app_id: None,
                app_key: None,
                default_limit: 24,
                max_limit: 50,
            },
        }
    }
}
