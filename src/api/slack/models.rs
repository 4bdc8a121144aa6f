use serde::Serialize;
use thiserror::Error;

/// Incoming-webhook message payload
#[derive(Debug, Clone, Serialize)]
pub struct SlackMessage {
    pub username: String,
    pub channel: String,
    pub icon_emoji: String,
    pub link_names: bool,
    pub attachments: Vec<Attachment>,
}

/// One attachment block of a message
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    pub fallback: String,
    pub color: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<AttachmentField>>,
    pub ts: i64,
}

/// Title/value pair rendered inside an attachment
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

/// Errors from webhook delivery
#[derive(Debug, Error)]
pub enum SlackError {
    /// Network/request failure
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Webhook answered with a non-success status
    #[error("webhook returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_with_webhook_field_names() {
        let message = SlackMessage {
            username: "AWS Billing at 2018-11-02".to_string(),
            channel: "#billing".to_string(),
            icon_emoji: ":aws1:".to_string(),
            link_names: true,
            attachments: vec![Attachment {
                fallback: "-".to_string(),
                color: "#36a64f".to_string(),
                title: "Total".to_string(),
                fields: None,
                ts: 1541116800,
            }],
        };

        let json: serde_json::Value = serde_json::to_value(&message).unwrap();
        assert_eq!(json["icon_emoji"], ":aws1:");
        assert_eq!(json["link_names"], true);
        assert_eq!(json["attachments"][0]["fallback"], "-");
        assert_eq!(json["attachments"][0]["ts"], 1541116800);
        // attachments without fields must omit the key entirely
        assert!(json["attachments"][0].get("fields").is_none());
    }
}
