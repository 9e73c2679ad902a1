#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod env;
mod loader;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Top-level voxclone configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The hosted inference space to talk to
    pub space: SpaceConfig,
    /// Default sampling parameters for generation requests
    #[serde(default)]
    pub defaults: GenerationDefaults,
}

/// Connection settings for the hosted space
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpaceConfig {
    /// Space address: a full URL or a Hugging Face `owner/space` id
    pub address: String,
    /// Bearer token for private or rate-limited spaces
    ///
    /// Usually injected as `{{ env.HF_TOKEN | default("") }}`; an empty
    /// value means unauthenticated access.
    #[serde(default)]
    pub auth_token: Option<SecretString>,
    /// Ceiling on one synthesis call, in seconds
    #[serde(default = "default_call_timeout_seconds")]
    pub call_timeout_seconds: u64,
}

impl SpaceConfig {
    /// Configured auth token, treating an empty string as absent
    pub fn auth_token(&self) -> Option<&SecretString> {
        self.auth_token.as_ref().filter(|token| !token.expose_secret().is_empty())
    }

    pub const fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_seconds)
    }
}

/// Default sampling parameters, matching the sliders the space exposes
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationDefaults {
    /// Prompt used when no text is given on the command line
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_seed")]
    pub seed: i64,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            text: None,
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            seed: default_seed(),
        }
    }
}

const fn default_call_timeout_seconds() -> u64 {
    60
}

const fn default_temperature() -> f64 {
    0.7
}

const fn default_top_p() -> f64 {
    0.85
}

const fn default_top_k() -> u32 {
    50
}

const fn default_seed() -> i64 {
    42
}
