pub mod client;
pub mod models;

pub use client::CloudWatchClient;
pub use models::{Datapoint, MetricDescriptor, MetricDimension, MetricsError};
