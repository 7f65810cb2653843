//! Client interface and factory functions.

mod builder;
mod client;

pub use builder::GeminiClientBuilder;
pub use client::{create_client, create_client_from_env, GeminiClient};
