use chat_relay::http::ReqwestClient;
use chat_relay::{Config, Relay, function_handler};
use lambda_runtime::tracing::{info, warn};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    // Read once; the relay is shared immutably by every invocation
    let relay = Relay::new(Config::from_env(), ReqwestClient::default());
    let config = relay.config();
    match config.base_url.as_deref() {
        Some(base_url) => info!(base_url, model_id = %config.model_id, "Loaded configuration"),
        None => warn!("FASTAPI_BASE_URL is not set; requests will fail until it is configured"),
    }

    let relay = &relay;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(relay, event).await
    }))
    .await
}
