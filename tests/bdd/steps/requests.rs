//! Steps that configure headers and issue requests.

use anyhow::{Context, Result, ensure};
use restapi_steps::steps::Table;
use rstest_bdd_macros::{given, then, when};
use test_support::display_error_chain;

use crate::bdd::fixtures::{TestWorld, strip_quotes};

#[given("I set header {name:string} with value {value:string}")]
fn set_header(world: &TestWorld, name: &str, value: &str) {
    world.with_context(|ctx| ctx.set_header(strip_quotes(name), strip_quotes(value)));
}

#[given("I remove header {name:string}")]
fn remove_header(world: &TestWorld, name: &str) {
    world.with_context(|ctx| ctx.remove_header(strip_quotes(name)));
}

#[when("I make request {method:string} {uri:string}")]
fn make_request(world: &TestWorld, method: &str, uri: &str) -> Result<()> {
    world.with_context(|ctx| ctx.make_request(strip_quotes(method), strip_quotes(uri)))?;
    Ok(())
}

#[when("I make request {method:string} {uri:string} with param {name:string} set to {value:string}")]
fn make_request_with_param(
    world: &TestWorld,
    method: &str,
    uri: &str,
    name: &str,
    value: &str,
) -> Result<()> {
    let table = Table::new([[strip_quotes(name), strip_quotes(value)]]);
    world.with_context(|ctx| {
        ctx.make_request_with_params(strip_quotes(method), strip_quotes(uri), &table)
    })?;
    Ok(())
}

#[when("I try to make request {method:string} {uri:string}")]
fn try_make_request(world: &TestWorld, method: &str, uri: &str) -> Result<()> {
    let outcome =
        world.with_context(|ctx| ctx.make_request(strip_quotes(method), strip_quotes(uri)));
    let err = outcome
        .err()
        .context("the request was expected to fail")?;
    world.step_error.set(display_error_chain(&err));
    Ok(())
}

#[then("the step error contains {fragment:string}")]
fn step_error_contains(world: &TestWorld, fragment: &str) -> Result<()> {
    let error = world
        .step_error
        .get()
        .context("no step error was recorded")?;
    let fragment = strip_quotes(fragment);
    ensure!(
        error.contains(fragment),
        "error `{error}` should contain `{fragment}`"
    );
    Ok(())
}
