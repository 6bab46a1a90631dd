//! Abstractions for interacting with text-generation services.
//!
//! The `llm` crate defines a [`LLMClient`] trait along with the concrete
//! [`GeminiClient`], which talks to Google's `generateContent` endpoint. The
//! request and response bodies live in [`wire`].

pub mod client;
pub mod config;
pub mod runner;
pub mod traits;
pub mod wire;

pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use runner::{client_from_env, config_from_env, model_from_env, run_from_env};
pub use traits::{LLMClient, LLMError, MISSING_TEXT_MESSAGE};
