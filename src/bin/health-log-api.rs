use aws_sdk_dynamodb::Client;
use health_log_api::{
    api,
    config::Config,
    store::DynamoHealthLogStore,
    utils::{setup_sdk_config, setup_tracing},
};
use lambda_http::{service_fn, Request};
use tracing::{info, instrument};

type E = Box<dyn std::error::Error + Sync + Send + 'static>;

#[instrument]
#[tokio::main]
async fn main() -> Result<(), E> {
    setup_tracing();

    let config = Config::from_env()?;
    let sdk_config = setup_sdk_config(&config).await;
    let store = DynamoHealthLogStore::new(Client::new(&sdk_config), &config);
    info!(table_name = store.table_name(), "health log store ready");

    let router = api::router(&store);
    lambda_http::run(service_fn(|request: Request| router.handle(request))).await?;

    Ok(())
}
