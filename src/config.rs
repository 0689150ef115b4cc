//! Runtime configuration
//!
//! Everything is read from the environment once at startup and handed to the
//! agent as plain values.

use crate::agent::{AgentSettings, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_TOKENS};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const API_KEY_VAR: &str = "POE_API_KEY";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.poe.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("POE_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

/// Resolved configuration
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_iterations: usize,
    pub max_tokens: u32,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: lookup("RESEARCH_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: lookup("RESEARCH_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_iterations: parse_or(&lookup, "RESEARCH_MAX_ITERATIONS", DEFAULT_MAX_ITERATIONS)?,
            max_tokens: parse_or(&lookup, "RESEARCH_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "RESEARCH_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
        })
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, model: Option<String>, max_iterations: Option<usize>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(max_iterations) = max_iterations {
            self.max_iterations = max_iterations;
        }
        self
    }

    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings {
            max_iterations: self.max_iterations,
            max_tokens: self.max_tokens,
            timeout: Some(self.request_timeout),
        }
    }
}

// Keep the credential out of logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_iterations", &self.max_iterations)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
    }
}
