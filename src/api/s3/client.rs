use thiserror::Error;
use tracing::debug;

/// Errors from fetching a log archive object
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Request failed (missing object, auth, network)
    #[error("S3 request failed: {0}")]
    Api(#[from] aws_sdk_s3::Error),
    /// Object body could not be read to the end
    #[error("failed to read object body: {0}")]
    Body(#[from] aws_sdk_s3::primitives::ByteStreamError),
}

/// S3 client for downloading CloudTrail log archives
pub struct ArchiveClient {
    client: aws_sdk_s3::Client,
}

impl ArchiveClient {
    /// Create a client for the given region using the default credential chain
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
        }
    }

    /// Download the object as raw (still compressed) bytes
    pub async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ArchiveError> {
        debug!("Fetching s3://{}/{}", bucket, key);

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        let body = response.body.collect().await?;
        Ok(body.into_bytes().to_vec())
    }
}
