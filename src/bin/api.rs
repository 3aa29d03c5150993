use chat_relay::api::handler;
use chat_relay::clients::GenerateClient;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    chat_relay::setup_logging();

    // One HTTP client for the lifetime of the execution environment.
    let client = GenerateClient::from_env()?;
    let client = &client;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(client, event).await
    }))
    .await
}
