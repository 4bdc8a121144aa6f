use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;

use config::Config;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("billwatch=debug".parse().unwrap()),
        )
        .with_target(true)
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        None | Some("billing") => {
            info!("Running billing report");
            services::billing_service::run(&config)
                .await
                .map_err(|e| e.to_string())
        }
        Some("trail") => run_trail(&config, &args[1..]).await,
        Some(other) => Err(format!(
            "unknown command '{}', expected 'billing' or 'trail'",
            other
        )),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// `trail <bucket> <key>` with an explicit object reference, or
/// `trail --event <file>` to pull bucket/key out of an SNS event payload.
async fn run_trail(config: &Config, args: &[String]) -> Result<(), String> {
    let (bucket, key) = match args {
        [flag, path] if flag == "--event" => {
            let payload = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read event file {}: {}", path, e))?;
            services::trail_service::parse_delivery_event(&payload).map_err(|e| e.to_string())?
        }
        [bucket, key] => (bucket.clone(), key.clone()),
        _ => {
            return Err("usage: billwatch trail <bucket> <key> | trail --event <file>".to_string())
        }
    };

    info!("Running CloudTrail report for s3://{}/{}", bucket, key);
    services::trail_service::run(config, &bucket, &key)
        .await
        .map_err(|e| e.to_string())
}
