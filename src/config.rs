use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
}

/// Runtime configuration, read once at startup and injected into every
/// client and assembler so tests can substitute their own values.
#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: String,
    pub billing_channel: String,
    pub trail_channel: String,
    pub region: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            webhook_url: env::var("SLACK_WEBHOOK_URL")
                .map_err(|_| ConfigError::Missing("SLACK_WEBHOOK_URL"))?,
            billing_channel: env::var("SLACK_BILLING_CHANNEL")
                .unwrap_or_else(|_| "#billing".to_string()),
            trail_channel: env::var("SLACK_TRAIL_CHANNEL")
                .unwrap_or_else(|_| "#aws_cloudtrail".to_string()),
            // billing metrics only exist in us-east-1
            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        })
    }
}
