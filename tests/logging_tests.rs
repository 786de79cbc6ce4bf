//! Tests for the structured log events emitted while running steps.

use anyhow::Result;
use restapi_steps::http::Method;
use restapi_steps::{RestApiContext, ScenarioConfig};
use rstest::{fixture, rstest};
use test_support::{StubApi, capture_logs};
use tracing::Level;

#[fixture]
fn api() -> StubApi {
    let api = StubApi::new();
    api.respond(Method::Get, "/users/42", 200, r#"{"id": 42, "name": "Ann"}"#);
    api
}

#[rstest]
fn print_last_response_logs_status_and_body(api: StubApi) -> Result<()> {
    let mut context = RestApiContext::new(api, ScenarioConfig::default());
    context.make_request("GET", "/users/42")?;
    let mut outcome = Ok(());
    let output = capture_logs(Level::INFO, || {
        outcome = context.print_last_response();
    });
    outcome?;
    assert!(output.contains("last response"), "logs: {output}");
    assert!(output.contains("status=200"), "logs: {output}");
    assert!(output.contains("Ann"), "logs: {output}");
    Ok(())
}

#[rstest]
fn requests_are_logged_at_debug_only(api: StubApi) {
    let mut context = RestApiContext::new(api, ScenarioConfig::default());
    let info = capture_logs(Level::INFO, || {
        context
            .make_request("GET", "/users/42")
            .expect("stubbed request succeeds");
    });
    assert!(info.contains("response received"), "logs: {info}");
    assert!(!info.contains("sending request"), "logs: {info}");

    let debug = capture_logs(Level::DEBUG, || {
        context
            .make_request("GET", "/users/42")
            .expect("stubbed request succeeds");
    });
    assert!(debug.contains("sending request"), "logs: {debug}");
    assert!(debug.contains("uri=/users/42"), "logs: {debug}");
}
