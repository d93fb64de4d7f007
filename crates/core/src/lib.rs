#![deny(unused)]
//! Core types, traits, and error definitions for Recetario.
//!
//! This crate provides the foundational building blocks shared by the
//! translation gateway, the provider clients, and the binary.

pub mod config;
pub mod error;
pub mod mocks;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
