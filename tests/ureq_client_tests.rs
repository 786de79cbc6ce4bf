//! Tests for the `ureq`-backed client against a local fixture server.

use std::net::TcpListener;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use restapi_steps::http::{
    HeaderSet, HttpClient, HttpError, Method, ParamValue, Params, Request, UreqClient,
    server_headers,
};
use rstest::{fixture, rstest};
use serde_json::json;
use test_support::{CapturedRequest, HttpServer, spawn_http_server};

#[fixture]
fn client() -> UreqClient {
    UreqClient::new(Duration::from_secs(2), Duration::from_secs(5))
}

fn request(method: Method, uri: String, params: Params, headers: &HeaderSet) -> Request {
    Request {
        method,
        uri,
        params,
        server: server_headers(headers, &HeaderSet::new()),
    }
}

fn captured(server: HttpServer) -> Result<CapturedRequest> {
    server
        .join()
        .map_err(|_| anyhow::anyhow!("fixture server panicked"))?
        .context("fixture server should capture a request")
}

#[rstest]
#[case(200)]
#[case(404)]
#[case(500)]
fn every_status_is_returned_as_a_response(
    mut client: UreqClient,
    #[case] status: u16,
) -> Result<()> {
    let (url, server) = spawn_http_server(status, r#"{"ok": false}"#);
    let sent = request(Method::Get, format!("{url}/ping"), Params::new(), &HeaderSet::new());
    let response = client.request(&sent)?;
    ensure!(response.status == status, "status {}", response.status);
    ensure!(response.body == r#"{"ok": false}"#, "body {}", response.body);
    let seen = captured(server)?;
    ensure!(seen.target == "/ping", "target {}", seen.target);
    Ok(())
}

#[rstest]
fn headers_travel_under_wire_names(mut client: UreqClient) -> Result<()> {
    let (url, server) = spawn_http_server(200, "{}");
    let headers: HeaderSet = [("X-Api-Key", "secret"), ("Accept", "application/json")]
        .into_iter()
        .collect();
    client.request(&request(Method::Get, url, Params::new(), &headers))?;
    let seen = captured(server)?;
    ensure!(
        seen.headers.iter().any(|(name, _)| name == "X-Api-Key"),
        "headers {:?}",
        seen.headers
    );
    ensure!(seen.header("x-api-key") == Some("secret"));
    ensure!(seen.header("accept") == Some("application/json"));
    Ok(())
}

#[rstest]
#[case(Method::Get)]
#[case(Method::Delete)]
fn query_methods_send_params_in_the_query_string(
    mut client: UreqClient,
    #[case] method: Method,
) -> Result<()> {
    let (url, server) = spawn_http_server(200, "[]");
    let mut params = Params::new();
    params.insert("q".into(), ParamValue::Text("ann lee".into()));
    params.insert("ids".into(), ParamValue::List(vec![json!(1), json!(2)]));
    client.request(&request(
        method,
        format!("{url}/users"),
        params,
        &HeaderSet::new(),
    ))?;
    let seen = captured(server)?;
    ensure!(seen.method == method.as_str(), "method {}", seen.method);
    ensure!(
        seen.target == "/users?q=ann+lee&ids%5B0%5D=1&ids%5B1%5D=2",
        "target {}",
        seen.target
    );
    ensure!(seen.body.is_empty(), "body {}", seen.body);
    Ok(())
}

#[rstest]
fn body_methods_send_a_form(mut client: UreqClient) -> Result<()> {
    let (url, server) = spawn_http_server(201, r#"{"id": 7}"#);
    let mut params = Params::new();
    params.insert("name".into(), ParamValue::Text("Ann".into()));
    params.insert("tags".into(), ParamValue::List(vec![json!("a")]));
    let response = client.request(&request(
        Method::Post,
        format!("{url}/users"),
        params,
        &HeaderSet::new(),
    ))?;
    ensure!(response.status == 201, "status {}", response.status);
    let seen = captured(server)?;
    ensure!(seen.target == "/users", "target {}", seen.target);
    ensure!(seen.body == "name=Ann&tags%5B0%5D=a", "body {}", seen.body);
    ensure!(
        seen.header("content-type") == Some("application/x-www-form-urlencoded"),
        "headers {:?}",
        seen.headers
    );
    Ok(())
}

#[rstest]
fn unreachable_server_is_a_transport_error(mut client: UreqClient) -> Result<()> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    let addr = listener.local_addr()?;
    drop(listener);
    let sent = request(
        Method::Get,
        format!("http://{addr}/ping"),
        Params::new(),
        &HeaderSet::new(),
    );
    let err = client
        .request(&sent)
        .err()
        .context("closed port should refuse the connection")?;
    ensure!(
        matches!(err, HttpError::Transport { ref method, .. } if method == "GET"),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[rstest]
fn relative_uri_is_rejected_before_sending(mut client: UreqClient) {
    let sent = request(Method::Get, "/ping".into(), Params::new(), &HeaderSet::new());
    let err = client.request(&sent).expect_err("relative URIs cannot be sent");
    assert!(
        matches!(err, HttpError::InvalidUri { ref uri, .. } if uri == "/ping"),
        "unexpected error: {err:?}"
    );
}
