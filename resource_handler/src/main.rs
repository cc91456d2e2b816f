use lambda_http::{run, service_fn, Error, Request};
use resource_handler::config::StoreConfig;
use resource_handler::{function_handler, DynamoStore, ResourceEngine};

const TRACE_DEBUG: &str = "TRACE_DEBUG";

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(match std::env::var(TRACE_DEBUG) {
            Ok(_) => tracing::Level::DEBUG,
            Err(_) => tracing::Level::INFO
        })
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    let config = StoreConfig::from_env()?;
    let engine = ResourceEngine::new(DynamoStore::connect(&config).await);

    run(service_fn(|event: Request| function_handler(&engine, event))).await
}
