#![deny(unused)]
//! HTTP gateway for Recetario.
//!
//! Hosts the translation endpoint (bounded response cache, prioritized
//! provider chain, identity fallback) and the recipe search proxy.

pub mod cache;
pub mod recipes;
pub mod server;
pub mod telemetry;
pub mod translate;

pub use cache::TranslationCache;
pub use recipes::RecipeSearchClient;
pub use server::{GatewayConfig, GatewayServer};
pub use telemetry::configure_tracing;
pub use translate::{TranslateJob, TranslateOutcome, TranslateService};
