//! Tests for configuration layering.

use super::*;
use anyhow::Result;
use ortho_config::figment::providers::Serialized;
use rstest::rstest;
use serde_json::json;

fn layered(overrides: &serde_json::Value) -> Figment {
    Figment::from(Serialized::defaults(RestApiConfig::default()))
        .merge(Serialized::defaults(overrides))
}

#[rstest]
fn defaults_apply_without_overrides() -> Result<()> {
    let config = RestApiConfig::from_figment(&layered(&json!({})))?;
    assert_eq!(config, RestApiConfig::default());
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    Ok(())
}

#[rstest]
fn overrides_replace_defaults() -> Result<()> {
    let config = RestApiConfig::from_figment(&layered(&json!({
        "base_url": "http://api.test",
        "timeout_secs": 5,
        "headers": {"accept": "application/json", "x-api-key": "k"},
    })))?;
    assert_eq!(config.base_url.as_deref(), Some("http://api.test"));
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
    assert_eq!(
        config.headers.get("x-api-key").map(String::as_str),
        Some("k")
    );
    Ok(())
}

#[rstest]
#[case(json!({"timeout_secs": 0}), "timeout_secs")]
#[case(json!({"connect_timeout_secs": 0}), "connect_timeout_secs")]
fn zero_timeouts_are_rejected(#[case] overrides: serde_json::Value, #[case] field: &str) {
    let err = RestApiConfig::from_figment(&layered(&overrides)).expect_err("zero timeout");
    assert_eq!(err.to_string(), format!("{field} must be at least one second"));
}

#[rstest]
fn wrong_types_fail_extraction() {
    let outcome = RestApiConfig::from_figment(&layered(&json!({"timeout_secs": "soon"})));
    assert!(matches!(outcome, Err(ConfigError::Extract(_))));
}
