//! Steps that script the stub API and inspect what it received.

use anyhow::{Context, Result, ensure};
use restapi_steps::http::{Method, ParamValue, Request};
use rstest_bdd_macros::{given, then};

use crate::bdd::documents::document;
use crate::bdd::fixtures::{RefCellOptionExt, TestWorld, strip_quotes};

fn last_request(world: &TestWorld) -> Result<Request> {
    world
        .api
        .last_request()
        .context("the API should have received a request")
}

#[given("the API serves the {name:string} document at {path:string}")]
fn serve_document(world: &TestWorld, name: &str, path: &str) -> Result<()> {
    let doc = document(strip_quotes(name))?;
    world
        .api
        .respond_json(Method::Get, strip_quotes(path), 200, &doc);
    Ok(())
}

#[given("the API serves plain text at {path:string}")]
fn serve_plain_text(world: &TestWorld, path: &str) {
    world
        .api
        .respond(Method::Get, strip_quotes(path), 200, "all systems go");
}

#[given("the API is offline")]
fn api_offline(world: &TestWorld) {
    world.api.go_offline();
}

#[given("the placeholder {name:string} is {value:string}")]
fn set_placeholder(world: &TestWorld, name: &str, value: &str) -> Result<()> {
    ensure!(
        !world.context.is_some(),
        "placeholders must be declared before the context is first used"
    );
    world
        .params
        .borrow_mut()
        .set(strip_quotes(name), strip_quotes(value));
    Ok(())
}

#[then("the API received a {method:string} request for {uri:string}")]
fn received_request(world: &TestWorld, method: &str, uri: &str) -> Result<()> {
    let request = last_request(world)?;
    let expected: Method = strip_quotes(method).parse()?;
    ensure!(
        request.method == expected,
        "expected {expected}, got {}",
        request.method
    );
    ensure!(
        request.uri == strip_quotes(uri),
        "expected URI {uri}, got {}",
        request.uri
    );
    Ok(())
}

#[then("the API received header {name:string} with value {value:string}")]
fn received_header(world: &TestWorld, name: &str, value: &str) -> Result<()> {
    let request = last_request(world)?;
    let name = strip_quotes(name);
    let actual = request
        .server
        .get(name)
        .with_context(|| format!("header {name} missing from {:?}", request.server))?;
    ensure!(
        actual == strip_quotes(value),
        "header {name} is '{actual}', expected {value}"
    );
    Ok(())
}

#[then("the API received no header {name:string}")]
fn received_no_header(world: &TestWorld, name: &str) -> Result<()> {
    let request = last_request(world)?;
    let name = strip_quotes(name);
    ensure!(
        request.server.get(name).is_none(),
        "header {name} should be absent from {:?}",
        request.server
    );
    Ok(())
}

#[then("the API received param {name:string} as a list of {count:usize} items")]
fn received_list_param(world: &TestWorld, name: &str, count: usize) -> Result<()> {
    let request = last_request(world)?;
    let name = strip_quotes(name);
    let param = request
        .params
        .get(name)
        .with_context(|| format!("param {name} missing"))?;
    let ParamValue::List(items) = param else {
        anyhow::bail!("param {name} should be a list, got {param:?}");
    };
    ensure!(items.len() == count, "param {name} has {} items", items.len());
    Ok(())
}

#[then("the API received param {name:string} with text {value:string}")]
fn received_text_param(world: &TestWorld, name: &str, value: &str) -> Result<()> {
    let request = last_request(world)?;
    let name = strip_quotes(name);
    let param = request
        .params
        .get(name)
        .with_context(|| format!("param {name} missing"))?;
    ensure!(
        *param == ParamValue::Text(strip_quotes(value).to_owned()),
        "param {name} is {param:?}, expected {value}"
    );
    Ok(())
}
