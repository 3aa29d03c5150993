use std::collections::HashMap;
use std::time::Duration;

use chat_relay::core::config::{
    AppConfig, DEFAULT_MODEL_ID, ENDPOINT_VAR, MODEL_ID_VAR, TIMEOUT_VAR,
    request_timeout_from_source,
};
use chat_relay::errors::RelayError;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_defaults_when_environment_is_empty() {
    let config = AppConfig::from_source(lookup(&[]));
    assert_eq!(config.model_id, DEFAULT_MODEL_ID);
    assert!(config.external_api_base.is_none());
    assert!(matches!(
        config.require_endpoint(),
        Err(RelayError::ConfigurationMissing(_))
    ));
}

#[test]
fn test_reads_endpoint_and_model() {
    let config = AppConfig::from_source(lookup(&[
        (ENDPOINT_VAR, " https://abc.ngrok.app/ "),
        (MODEL_ID_VAR, "custom-model"),
    ]));
    assert_eq!(config.model_id, "custom-model");
    assert_eq!(config.require_endpoint().unwrap(), "https://abc.ngrok.app/");
}

#[test]
fn test_blank_endpoint_counts_as_unset() {
    let config = AppConfig::from_source(lookup(&[(ENDPOINT_VAR, "   ")]));
    let err = config.require_endpoint().unwrap_err();
    assert!(err.to_string().contains(ENDPOINT_VAR));
}

#[test]
fn test_request_timeout_parsing() {
    assert_eq!(
        request_timeout_from_source(lookup(&[(TIMEOUT_VAR, "15")])),
        Some(Duration::from_secs(15))
    );
    assert_eq!(request_timeout_from_source(lookup(&[(TIMEOUT_VAR, "0")])), None);
    assert_eq!(request_timeout_from_source(lookup(&[(TIMEOUT_VAR, "soon")])), None);
    assert_eq!(request_timeout_from_source(lookup(&[])), None);
}
