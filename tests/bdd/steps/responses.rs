//! Assertion steps over the last response.
//!
//! Each step forwards its arguments to the matching `RestApiContext` method
//! and fails the scenario with the context's error.

use anyhow::Result;
use rstest_bdd_macros::then;

use crate::bdd::fixtures::{TestWorld, strip_quotes};

#[then("the response should be JSON")]
fn should_be_json(world: &TestWorld) -> Result<()> {
    world.with_context(|ctx| ctx.response_should_be_json())?;
    Ok(())
}

#[then("the response status code should be {code:u32}")]
fn status_code(world: &TestWorld, code: u32) -> Result<()> {
    world.with_context(|ctx| ctx.status_code_should_be(&code.to_string()))?;
    Ok(())
}

#[then("print last response")]
fn print_last_response(world: &TestWorld) -> Result<()> {
    world.with_context(|ctx| ctx.print_last_response())?;
    Ok(())
}

#[then("the response JSON should be a collection")]
fn should_be_collection(world: &TestWorld) -> Result<()> {
    world.with_context(|ctx| ctx.response_should_be_collection())?;
    Ok(())
}

#[then("the response JSON should be a single object")]
fn should_be_single_object(world: &TestWorld) -> Result<()> {
    world.with_context(|ctx| ctx.response_should_be_single_object())?;
    Ok(())
}

#[then("the response JSON should have {property:string} field")]
fn has_field(world: &TestWorld, property: &str) -> Result<()> {
    world.with_context(|ctx| ctx.response_should_have_field(strip_quotes(property)))?;
    Ok(())
}

#[then("the response JSON should have {property:string} field with value {expected:string}")]
fn has_field_with_value(world: &TestWorld, property: &str, expected: &str) -> Result<()> {
    world.with_context(|ctx| {
        ctx.response_should_have_field_with_value(strip_quotes(property), strip_quotes(expected))
    })?;
    Ok(())
}

#[then("the response JSON should have {property:string} field with exact value {expected:string}")]
fn has_field_with_exact_value(world: &TestWorld, property: &str, expected: &str) -> Result<()> {
    world.with_context(|ctx| {
        ctx.response_should_have_field_with_exact_value(
            strip_quotes(property),
            strip_quotes(expected),
        )
    })?;
    Ok(())
}

#[then("the response JSON should have {property:string} field matching {pattern:string}")]
fn has_field_matching(world: &TestWorld, property: &str, pattern: &str) -> Result<()> {
    world.with_context(|ctx| {
        ctx.response_should_have_field_matching(strip_quotes(property), strip_quotes(pattern))
    })?;
    Ok(())
}

#[then("the response JSON should have {property:string} field set to {expected:string}")]
fn has_field_set_to(world: &TestWorld, property: &str, expected: &str) -> Result<()> {
    world.with_context(|ctx| {
        ctx.response_should_have_field_set_to(strip_quotes(property), strip_quotes(expected))
    })?;
    Ok(())
}

#[then("the response JSON should have {property:string} fields with array {literal:string} as value")]
fn has_field_with_array(world: &TestWorld, property: &str, literal: &str) -> Result<()> {
    world.with_context(|ctx| {
        ctx.response_should_have_field_with_array(strip_quotes(property), strip_quotes(literal))
    })?;
    Ok(())
}

#[then("the response JSON should have nested {path:string} field with value {expected:string}")]
fn has_nested_field(world: &TestWorld, path: &str, expected: &str) -> Result<()> {
    world.with_context(|ctx| {
        ctx.response_should_have_nested_field_with_value(strip_quotes(path), strip_quotes(expected))
    })?;
    Ok(())
}

#[then("the response JSON {field:string} field should be a collection")]
fn field_is_collection(world: &TestWorld, field: &str) -> Result<()> {
    world.with_context(|ctx| ctx.field_should_be_collection(strip_quotes(field)))?;
    Ok(())
}

#[then("the response collection should have {count:usize} items")]
fn collection_count(world: &TestWorld, count: usize) -> Result<()> {
    world.with_context(|ctx| ctx.collection_should_have_count(&count.to_string()))?;
    Ok(())
}

#[then("the response collection should be empty")]
fn collection_empty(world: &TestWorld) -> Result<()> {
    world.with_context(|ctx| ctx.collection_should_be_empty())?;
    Ok(())
}

#[then("the response collection should not be empty")]
fn collection_not_empty(world: &TestWorld) -> Result<()> {
    world.with_context(|ctx| ctx.collection_should_not_be_empty())?;
    Ok(())
}

#[then("all response collection items should have {property:string} field")]
fn all_items_have_field(world: &TestWorld, property: &str) -> Result<()> {
    world.with_context(|ctx| ctx.all_items_should_have_field(strip_quotes(property)))?;
    Ok(())
}

#[then("all response collection items should have {property:string} field with value {expected:string}")]
fn all_items_have_value(world: &TestWorld, property: &str, expected: &str) -> Result<()> {
    world.with_context(|ctx| {
        ctx.all_items_should_have_field_with_value(strip_quotes(property), strip_quotes(expected))
    })?;
    Ok(())
}

#[then("all response collection items should have nested field {path:string} with value {expected:string}")]
fn all_items_have_nested_value(world: &TestWorld, path: &str, expected: &str) -> Result<()> {
    world.with_context(|ctx| {
        ctx.all_items_should_have_nested_field_with_value(
            strip_quotes(path),
            strip_quotes(expected),
        )
    })?;
    Ok(())
}

#[then("all response collection items should have {property:string} field set to {expected:string}")]
fn all_items_set_to(world: &TestWorld, property: &str, expected: &str) -> Result<()> {
    world.with_context(|ctx| {
        ctx.all_items_should_have_field_set_to(strip_quotes(property), strip_quotes(expected))
    })?;
    Ok(())
}

#[then("at least one response collection item should have {property:string} field with value {expected:string}")]
fn some_item_has_value(world: &TestWorld, property: &str, expected: &str) -> Result<()> {
    world.with_context(|ctx| {
        ctx.at_least_one_item_should_have_field_with_value(
            strip_quotes(property),
            strip_quotes(expected),
        )
    })?;
    Ok(())
}

#[then("all nested {collection:string} collection items should have {property:string} field")]
fn nested_items_have_field(world: &TestWorld, collection: &str, property: &str) -> Result<()> {
    world.with_context(|ctx| {
        ctx.all_nested_items_should_have_field(strip_quotes(collection), strip_quotes(property))
    })?;
    Ok(())
}

#[then("all nested {collection:string} collection items should have {property:string} field set to {expected:string}")]
fn nested_items_set_to(
    world: &TestWorld,
    collection: &str,
    property: &str,
    expected: &str,
) -> Result<()> {
    world.with_context(|ctx| {
        ctx.all_nested_items_should_have_field_set_to(
            strip_quotes(collection),
            strip_quotes(property),
            strip_quotes(expected),
        )
    })?;
    Ok(())
}

#[then("all nested {collection:string} collection items should have {property:string} field with value {expected:string}")]
fn nested_items_have_value(
    world: &TestWorld,
    collection: &str,
    property: &str,
    expected: &str,
) -> Result<()> {
    world.with_context(|ctx| {
        ctx.all_nested_items_should_have_field_with_value(
            strip_quotes(collection),
            strip_quotes(property),
            strip_quotes(expected),
        )
    })?;
    Ok(())
}

#[then("all nested {collection:string} collection items should have nested {path:string} field with value {expected:string}")]
fn nested_items_have_nested_value(
    world: &TestWorld,
    collection: &str,
    path: &str,
    expected: &str,
) -> Result<()> {
    world.with_context(|ctx| {
        ctx.all_nested_items_should_have_nested_field_with_value(
            strip_quotes(collection),
            strip_quotes(path),
            strip_quotes(expected),
        )
    })?;
    Ok(())
}
