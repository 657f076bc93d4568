use anyhow::{Context, Result};

/// Provider configuration, resolved once at process start and passed
/// into the client constructors. Never re-read mid-run.
pub struct MistralConfig {
    pub api_key: String,
}

impl MistralConfig {
    /// A missing credential is a fatal configuration error, raised
    /// before any provider I/O is attempted.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("MISTRAL_API_KEY")
            .context("MISTRAL_API_KEY is not set. Export it before running.")?;

        Ok(Self { api_key })
    }
}
