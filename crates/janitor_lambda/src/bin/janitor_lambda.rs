use chrono::Utc;
use janitor_core::config::JanitorConfig;
use janitor_core::contract::CleanupResponse;
use janitor_lambda::adapters::aws_ec2::Ec2ComputeApi;
use janitor_lambda::adapters::aws_sns::SnsNotifier;
use janitor_lambda::handlers::cleanup::handle_cleanup_event;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

async fn handle_request(event: LambdaEvent<Value>) -> Result<CleanupResponse, Error> {
    let config = JanitorConfig::from_env().map_err(|error| Error::from(error.to_string()))?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let compute = Ec2ComputeApi::new(aws_sdk_ec2::Client::new(&aws_config));
    let notifier = SnsNotifier::new(aws_sdk_sns::Client::new(&aws_config));

    handle_cleanup_event(event.payload, &config, Utc::now(), &compute, &notifier)
        .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .without_time()
        .init();

    lambda_runtime::run(service_fn(handle_request)).await
}
