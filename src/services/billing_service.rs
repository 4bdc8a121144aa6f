use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::api::cloudwatch::{CloudWatchClient, Datapoint, MetricDescriptor, MetricsError};
use crate::api::slack::{SlackClient, SlackError};
use crate::config::Config;
use crate::models::{Billing, ServiceBilling};
use crate::services::report_service;

/// Errors that abort a billing report run
#[derive(Debug, Error)]
pub enum BillingError {
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error(transparent)]
    Slack(#[from] SlackError),
}

/// Reduce a month-scoped series of cumulative readings to billing figures.
///
/// The series arrives newest-first from the CloudWatch boundary. With two or
/// more readings the daily figure is the most recent day-over-day change and
/// the monthly figure is the highest cumulative reading seen.
pub fn compute_billing(series: &[Datapoint]) -> Billing {
    match series {
        // No usage recorded yet this month
        [] => Billing {
            daily: 0.0,
            monthly: 0.0,
        },
        // First day of the month: the whole total so far is today's
        [only] => Billing {
            daily: only.maximum,
            monthly: only.maximum,
        },
        [first, second, rest @ ..] => {
            let mut monthly = first.maximum.max(second.maximum);
            for dp in rest {
                monthly = monthly.max(dp.maximum);
            }
            Billing {
                // abs: the backend occasionally reports the two latest
                // readings out of order, so take the magnitude
                daily: (first.maximum - second.maximum).abs(),
                monthly,
            }
        }
    }
}

/// Distinct service names found in the metric descriptors' dimensions.
///
/// Descriptors without a ServiceName dimension are account-level entries and
/// are skipped. Order of first appearance is preserved.
pub fn list_services(descriptors: &[MetricDescriptor]) -> Vec<String> {
    let mut services: Vec<String> = Vec::new();
    for descriptor in descriptors {
        if let Some(dim) = descriptor
            .dimensions
            .iter()
            .find(|d| d.name == "ServiceName")
        {
            if !services.contains(&dim.value) {
                services.push(dim.value.clone());
            }
        }
    }
    services
}

/// Full billing report flow: fetch, compute, assemble, deliver.
///
/// Any fetch or delivery failure aborts the whole run; no partial message is
/// ever posted.
pub async fn run(config: &Config) -> Result<(), BillingError> {
    let today = Utc::now();
    let cloudwatch = CloudWatchClient::new(&config.region).await;

    let total = compute_billing(&cloudwatch.billing_series(today, None).await?);
    info!(
        "Total billing: ${:.2} (+${:.2})",
        total.monthly, total.daily
    );

    let services = list_services(&cloudwatch.list_billing_metrics().await?);
    debug!("{} services carry billing metrics", services.len());

    let mut breakdown = Vec::with_capacity(services.len());
    for service in services {
        let series = cloudwatch.billing_series(today, Some(&service)).await?;
        breakdown.push(ServiceBilling {
            service,
            billing: compute_billing(&series),
        });
    }

    let message = report_service::build_billing_message(config, today, &total, &breakdown);
    let slack = SlackClient::new(config.webhook_url.clone());
    let response = slack.post_message(&message).await?;
    info!("Slack response: {}", response);

    Ok(())
}
