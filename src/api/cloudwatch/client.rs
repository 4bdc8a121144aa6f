use aws_sdk_cloudwatch::primitives::DateTime as AwsDateTime;
use aws_sdk_cloudwatch::types::{Dimension, Statistic};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::models::{shape_series, Datapoint, MetricDescriptor, MetricDimension, MetricsError};

const NAMESPACE: &str = "AWS/Billing";
const METRIC_NAME: &str = "EstimatedCharges";
const PERIOD_SECONDS: i32 = 86_400;
// Two days back plus today guarantees "yesterday and today" are in the window
const LOOKBACK_DAYS: i64 = 2;

/// CloudWatch client scoped to the AWS/Billing EstimatedCharges metric
pub struct CloudWatchClient {
    client: aws_sdk_cloudwatch::Client,
}

impl CloudWatchClient {
    /// Create a client for the given region using the default credential chain
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: aws_sdk_cloudwatch::Client::new(&config),
        }
    }

    /// List all descriptors of the EstimatedCharges metric with their dimensions
    pub async fn list_billing_metrics(&self) -> Result<Vec<MetricDescriptor>, MetricsError> {
        let response = self
            .client
            .list_metrics()
            .namespace(NAMESPACE)
            .metric_name(METRIC_NAME)
            .send()
            .await
            .map_err(aws_sdk_cloudwatch::Error::from)?;

        let descriptors = response
            .metrics()
            .iter()
            .map(|metric| MetricDescriptor {
                dimensions: metric
                    .dimensions()
                    .iter()
                    .filter_map(|d| {
                        Some(MetricDimension {
                            name: d.name()?.to_string(),
                            value: d.value()?.to_string(),
                        })
                    })
                    .collect(),
            })
            .collect();

        Ok(descriptors)
    }

    /// Fetch the cumulative-charge series for the reference instant's month,
    /// account-wide or scoped to one service, newest reading first.
    ///
    /// An empty result means no usage recorded yet this month, not a failure.
    pub async fn billing_series(
        &self,
        reference: DateTime<Utc>,
        service: Option<&str>,
    ) -> Result<Vec<Datapoint>, MetricsError> {
        let mut dimensions = vec![Dimension::builder()
            .name("Currency")
            .value("USD")
            .build()];
        if let Some(name) = service {
            dimensions.push(Dimension::builder().name("ServiceName").value(name).build());
        }

        let start = reference - Duration::days(LOOKBACK_DAYS);
        debug!(
            "Querying {}/{} over [{}, {}] service={:?}",
            NAMESPACE, METRIC_NAME, start, reference, service
        );

        let response = self
            .client
            .get_metric_statistics()
            .namespace(NAMESPACE)
            .metric_name(METRIC_NAME)
            .set_dimensions(Some(dimensions))
            .start_time(AwsDateTime::from_millis(start.timestamp_millis()))
            .end_time(AwsDateTime::from_millis(reference.timestamp_millis()))
            .period(PERIOD_SECONDS)
            .statistics(Statistic::Maximum)
            .send()
            .await
            .map_err(aws_sdk_cloudwatch::Error::from)?;

        let mut series = Vec::new();
        for raw in response.datapoints() {
            let stamp = raw
                .timestamp()
                .ok_or(MetricsError::MalformedDatapoint("timestamp"))?;
            let timestamp = DateTime::from_timestamp(stamp.secs(), stamp.subsec_nanos())
                .ok_or(MetricsError::MalformedDatapoint("timestamp"))?;
            let maximum = raw
                .maximum()
                .ok_or(MetricsError::MalformedDatapoint("maximum"))?;
            series.push(Datapoint { timestamp, maximum });
        }

        Ok(shape_series(series, reference))
    }
}
