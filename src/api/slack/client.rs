use reqwest::Client as HttpClient;
use tracing::debug;

use super::models::{SlackError, SlackMessage};

/// Slack incoming-webhook client
pub struct SlackClient {
    http_client: HttpClient,
    webhook_url: String,
}

impl SlackClient {
    /// Create a client posting to the given webhook URL
    pub fn new(webhook_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            webhook_url,
        }
    }

    /// POST the message as JSON and return the raw response body
    pub async fn post_message(&self, message: &SlackMessage) -> Result<String, SlackError> {
        debug!("Posting to {} for {}", self.webhook_url, message.channel);

        let response = self
            .http_client
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SlackError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
