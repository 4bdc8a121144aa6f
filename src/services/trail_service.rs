//! CloudTrail log-delivery notifications
//!
//! Triggered per delivered archive: download the gzipped object, parse its
//! records and forward a one-line "source (action)" digest to Slack.

use std::io::Read;

use chrono::Utc;
use flate2::read::GzDecoder;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::api::s3::{ArchiveClient, ArchiveError};
use crate::api::slack::{AttachmentField, SlackClient, SlackError};
use crate::config::Config;
use crate::services::report_service;

/// Errors that abort a CloudTrail notification run
#[derive(Debug, Error)]
pub enum TrailError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("failed to decompress archive: {0}")]
    Decompress(#[from] std::io::Error),
    #[error("malformed log payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("event carries no log-delivery record")]
    MissingRecord,
    #[error(transparent)]
    Slack(#[from] SlackError),
}

#[derive(Debug, Deserialize)]
struct SnsEnvelope {
    #[serde(rename = "Records")]
    records: Vec<SnsRecord>,
}

#[derive(Debug, Deserialize)]
struct SnsRecord {
    #[serde(rename = "Sns")]
    sns: SnsBody,
}

#[derive(Debug, Deserialize)]
struct SnsBody {
    #[serde(rename = "Message")]
    message: String,
}

/// CloudTrail's log-delivery notice, carried as a JSON string inside the SNS message
#[derive(Debug, Deserialize)]
struct DeliveryNotice {
    #[serde(rename = "s3Bucket")]
    s3_bucket: String,
    #[serde(rename = "s3ObjectKey")]
    s3_object_key: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TrailLog {
    #[serde(rename = "Records")]
    records: Vec<TrailRecord>,
}

/// The two fields of a CloudTrail record the digest cares about
#[derive(Debug, Deserialize)]
pub struct TrailRecord {
    #[serde(rename = "eventSource")]
    pub event_source: String,
    #[serde(rename = "eventName")]
    pub event_name: String,
}

/// Extract the bucket and object key from an SNS log-delivery event payload
pub fn parse_delivery_event(payload: &str) -> Result<(String, String), TrailError> {
    let envelope: SnsEnvelope = serde_json::from_str(payload)?;
    let record = envelope
        .records
        .into_iter()
        .next()
        .ok_or(TrailError::MissingRecord)?;
    let notice: DeliveryNotice = serde_json::from_str(&record.sns.message)?;
    let key = notice
        .s3_object_key
        .into_iter()
        .next()
        .ok_or(TrailError::MissingRecord)?;
    Ok((notice.s3_bucket, key))
}

/// Gunzip an archive and parse its CloudTrail records
fn parse_archive(bytes: &[u8]) -> Result<Vec<TrailRecord>, TrailError> {
    let mut decoder = GzDecoder::new(bytes);
    let mut json = String::new();
    decoder.read_to_string(&mut json)?;
    let log: TrailLog = serde_json::from_str(&json)?;
    Ok(log.records)
}

/// One "source (action)" line per record
fn summarize(records: &[TrailRecord]) -> Vec<AttachmentField> {
    records
        .iter()
        .map(|record| AttachmentField {
            title: ":aws: CloudTrail".to_string(),
            value: format!("{}  ({})", record.event_source, record.event_name),
            short: false,
        })
        .collect()
}

/// Full notification flow for one delivered archive
pub async fn run(config: &Config, bucket: &str, key: &str) -> Result<(), TrailError> {
    let archive = ArchiveClient::new(&config.region).await;

    let records = match fetch_records(&archive, bucket, key).await {
        Ok(records) => records,
        Err(e) => {
            error!(
                "Failed to read CloudTrail archive s3://{}/{}: {}",
                bucket, key, e
            );
            return Err(e);
        }
    };
    info!(
        "{} CloudTrail records in s3://{}/{}",
        records.len(),
        bucket,
        key
    );

    let message = report_service::build_trail_message(config, Utc::now(), summarize(&records));
    let slack = SlackClient::new(config.webhook_url.clone());
    let response = slack.post_message(&message).await?;
    info!("Slack response: {}", response);

    Ok(())
}

async fn fetch_records(
    client: &ArchiveClient,
    bucket: &str,
    key: &str,
) -> Result<Vec<TrailRecord>, TrailError> {
    let bytes = client.fetch(bucket, key).await?;
    parse_archive(&bytes)
}
