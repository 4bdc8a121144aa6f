use aws_smithy_types::error::operation::BuildError;
use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;

/// One day's maximum cumulative estimated-charge reading
#[derive(Debug, Clone, PartialEq)]
pub struct Datapoint {
    pub timestamp: DateTime<Utc>,
    pub maximum: f64,
}

/// Dimension attached to a billing metric descriptor (e.g. Currency, ServiceName)
#[derive(Debug, Clone)]
pub struct MetricDimension {
    pub name: String,
    pub value: String,
}

/// Descriptor for one series of the EstimatedCharges metric
#[derive(Debug, Clone)]
pub struct MetricDescriptor {
    pub dimensions: Vec<MetricDimension>,
}

/// Errors from the CloudWatch metrics backend
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Request failed (network, auth, throttling)
    #[error("CloudWatch request failed: {0}")]
    Api(#[from] aws_sdk_cloudwatch::Error),
    /// Could not build a query dimension
    #[error("invalid metric dimension: {0}")]
    Dimension(#[from] BuildError),
    /// Response datapoint is missing a field the query guarantees
    #[error("CloudWatch datapoint missing {0}")]
    MalformedDatapoint(&'static str),
}

/// Restrict a raw series to the reference instant's calendar month and order
/// it most-recent-first, so the first two entries are today and yesterday.
///
/// The month filter is what makes the two-day lookback safe at a month
/// boundary: a reading from "two days ago" in the previous month never
/// reaches the calculator.
pub fn shape_series(mut series: Vec<Datapoint>, reference: DateTime<Utc>) -> Vec<Datapoint> {
    series.retain(|dp| {
        dp.timestamp.year() == reference.year() && dp.timestamp.month() == reference.month()
    });
    series.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dp(year: i32, month: u32, day: u32, maximum: f64) -> Datapoint {
        Datapoint {
            timestamp: Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap(),
            maximum,
        }
    }

    #[test]
    fn test_shape_series_drops_previous_month() {
        let reference = Utc.with_ymd_and_hms(2018, 11, 2, 12, 0, 0).unwrap();
        let shaped = shape_series(
            vec![
                dp(2018, 10, 31, 900.0),
                dp(2018, 11, 1, 1.5),
                dp(2018, 11, 2, 3.0),
            ],
            reference,
        );
        assert_eq!(shaped, vec![dp(2018, 11, 2, 3.0), dp(2018, 11, 1, 1.5)]);
    }

    #[test]
    fn test_shape_series_orders_newest_first() {
        let reference = Utc.with_ymd_and_hms(2018, 11, 3, 0, 0, 0).unwrap();
        let shaped = shape_series(
            vec![dp(2018, 11, 1, 1.0), dp(2018, 11, 3, 3.0), dp(2018, 11, 2, 2.0)],
            reference,
        );
        let days: Vec<u32> = shaped.iter().map(|d| d.timestamp.day()).collect();
        assert_eq!(days, vec![3, 2, 1]);
    }

    #[test]
    fn test_shape_series_same_month_previous_year_excluded() {
        let reference = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let shaped = shape_series(vec![dp(2018, 1, 1, 5.0), dp(2018, 12, 31, 7.0)], reference);
        assert!(shaped.is_empty());
    }
}
