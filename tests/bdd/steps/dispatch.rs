//! Steps that route phrase text through the crate's own dispatcher.
//!
//! Failure scenarios use these to state the expected error message without
//! failing the scenario itself.

use anyhow::{Context, Result, ensure};
use restapi_steps::steps::Steps;
use rstest_bdd_macros::then;
use test_support::display_error_chain;

use crate::bdd::fixtures::{TestWorld, strip_quotes};

#[then("checking {phrase:string} passes")]
fn checking_passes(world: &TestWorld, phrase: &str) -> Result<()> {
    let steps = Steps::new()?;
    world.with_context(|ctx| steps.run(ctx, strip_quotes(phrase), None))?;
    Ok(())
}

#[then("checking {phrase:string} fails with {message:string}")]
fn checking_fails(world: &TestWorld, phrase: &str, message: &str) -> Result<()> {
    let steps = Steps::new()?;
    let phrase = strip_quotes(phrase);
    let err = world
        .with_context(|ctx| steps.run(ctx, phrase, None))
        .err()
        .with_context(|| format!("'{phrase}' was expected to fail"))?;
    let rendered = display_error_chain(&err);
    let message = strip_quotes(message);
    ensure!(
        rendered.contains(message),
        "error `{rendered}` should contain `{message}`"
    );
    Ok(())
}
