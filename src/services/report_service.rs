//! Assembles Slack payloads from computed results
//!
//! Pure layout code: every amount is formatted as USD with two decimals and
//! the daily delta always carries a leading `+$`.

use chrono::{DateTime, Utc};

use crate::api::slack::{Attachment, AttachmentField, SlackMessage};
use crate::config::Config;
use crate::models::{Billing, ServiceBilling};

const SUMMARY_COLOR: &str = "#36a64f";
const DETAIL_COLOR: &str = "#cecdc8";

/// Billing report: a green summary attachment plus a per-service detail grid
pub fn build_billing_message(
    config: &Config,
    today: DateTime<Utc>,
    total: &Billing,
    breakdown: &[ServiceBilling],
) -> SlackMessage {
    let ts = today.timestamp();

    let summary = Attachment {
        fallback: "-".to_string(),
        color: SUMMARY_COLOR.to_string(),
        title: format!(
            "Total \n:moneybag:${:.2} (+ ${:.2})",
            total.monthly, total.daily
        ),
        fields: None,
        ts,
    };

    let fields = breakdown
        .iter()
        .map(|entry| AttachmentField {
            title: format!(":aws: {}", entry.service),
            value: format!(
                "${:.2}  (+${:.2})",
                entry.billing.monthly, entry.billing.daily
            ),
            short: true,
        })
        .collect();

    let detail = Attachment {
        fallback: "-".to_string(),
        color: DETAIL_COLOR.to_string(),
        title: "Detail".to_string(),
        fields: Some(fields),
        ts,
    };

    SlackMessage {
        username: format!("AWS Billing at {}", today.format("%Y-%m-%d")),
        channel: config.billing_channel.clone(),
        icon_emoji: ":aws1:".to_string(),
        link_names: true,
        attachments: vec![summary, detail],
    }
}

/// CloudTrail digest: one field per log record under a single detail attachment
pub fn build_trail_message(
    config: &Config,
    now: DateTime<Utc>,
    fields: Vec<AttachmentField>,
) -> SlackMessage {
    SlackMessage {
        username: "CloudTrail".to_string(),
        channel: config.trail_channel.clone(),
        icon_emoji: ":aws1:".to_string(),
        link_names: true,
        attachments: vec![Attachment {
            fallback: "-".to_string(),
            color: DETAIL_COLOR.to_string(),
            title: "Detail".to_string(),
            fields: Some(fields),
            ts: now.timestamp(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> Config {
        Config {
            webhook_url: "https://hooks.slack.com/services/TEST".to_string(),
            billing_channel: "#billing".to_string(),
            trail_channel: "#aws_cloudtrail".to_string(),
            region: "us-east-1".to_string(),
        }
    }

    #[test]
    fn test_summary_title_formats_currency_with_two_decimals() {
        let today = Utc.with_ymd_and_hms(2018, 11, 2, 12, 0, 0).unwrap();
        let total = Billing {
            daily: 1.5,
            monthly: 123.4,
        };

        let message = build_billing_message(&config(), today, &total, &[]);

        assert_eq!(
            message.attachments[0].title,
            "Total \n:moneybag:$123.40 (+ $1.50)"
        );
        assert_eq!(message.attachments[0].color, "#36a64f");
    }

    #[test]
    fn test_detail_field_carries_plus_sign_for_daily_delta() {
        let today = Utc.with_ymd_and_hms(2018, 11, 2, 12, 0, 0).unwrap();
        let breakdown = vec![ServiceBilling {
            service: "EC2".to_string(),
            billing: Billing {
                daily: 0.5,
                monthly: 10.0,
            },
        }];

        let message = build_billing_message(
            &config(),
            today,
            &Billing {
                daily: 0.5,
                monthly: 10.0,
            },
            &breakdown,
        );

        let fields = message.attachments[1].fields.as_ref().unwrap();
        assert_eq!(fields[0].title, ":aws: EC2");
        assert_eq!(fields[0].value, "$10.00  (+$0.50)");
        assert!(fields[0].short);
    }

    #[test]
    fn test_billing_message_envelope() {
        let today = Utc.with_ymd_and_hms(2018, 11, 2, 12, 0, 0).unwrap();
        let message = build_billing_message(
            &config(),
            today,
            &Billing {
                daily: 0.0,
                monthly: 0.0,
            },
            &[],
        );

        assert_eq!(message.username, "AWS Billing at 2018-11-02");
        assert_eq!(message.channel, "#billing");
        assert_eq!(message.icon_emoji, ":aws1:");
        assert!(message.link_names);
        assert_eq!(message.attachments.len(), 2);
        assert_eq!(message.attachments[0].ts, today.timestamp());
    }

    #[test]
    fn test_trail_message_targets_trail_channel() {
        let now = Utc.with_ymd_and_hms(2018, 11, 2, 12, 0, 0).unwrap();
        let fields = vec![AttachmentField {
            title: ":aws: CloudTrail".to_string(),
            value: "s3.amazonaws.com  (GetObject)".to_string(),
            short: false,
        }];

        let message = build_trail_message(&config(), now, fields);

        assert_eq!(message.username, "CloudTrail");
        assert_eq!(message.channel, "#aws_cloudtrail");
        assert_eq!(message.attachments.len(), 1);
        assert_eq!(
            message.attachments[0].fields.as_ref().unwrap()[0].value,
            "s3.amazonaws.com  (GetObject)"
        );
    }
}
