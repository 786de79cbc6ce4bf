//! Step vocabulary and a harness-neutral dispatcher.
//!
//! [`Steps`] compiles every supported phrase once and routes step text to the
//! matching [`RestApiContext`] method. Hosts that register steps with their
//! own Gherkin runner can call the context directly instead; the phrases
//! listed by [`Steps::definitions`] are the contract either way.
//!
//! # Examples
//!
//! ```rust
//! use restapi_steps::context::{RestApiContext, ScenarioConfig};
//! use restapi_steps::http::{HttpClient, HttpError, Request, Response};
//! use restapi_steps::steps::Steps;
//!
//! struct Fixed;
//!
//! impl HttpClient for Fixed {
//!     fn request(&mut self, _: &Request) -> Result<Response, HttpError> {
//!         Ok(Response { status: 200, body: r#"{"name": "Ann"}"#.into() })
//!     }
//! }
//!
//! let steps = Steps::new()?;
//! let mut context = RestApiContext::new(Fixed, ScenarioConfig::default());
//! steps.run(&mut context, r#"When I make request GET "/users/1""#, None)?;
//! steps.run(&mut context, r#"Then the response JSON should have "name" field with value "Ann""#, None)?;
//! # Ok::<(), restapi_steps::steps::StepError>(())
//! ```

mod error;
mod pattern;
mod table;

pub use error::StepError;
pub use pattern::StepPattern;
pub use table::Table;

use tracing::debug;

use crate::context::RestApiContext;

/// Gherkin keyword a phrase is documented under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Preconditions such as persistent headers.
    Given,
    /// Requests.
    When,
    /// Assertions on the last response.
    Then,
}

/// Captured placeholder values of a matched step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args(Vec<String>);

impl Args {
    /// Argument at `index`, or `""` when the phrase has fewer placeholders.
    #[must_use]
    pub fn at(&self, index: usize) -> &str {
        self.0.get(index).map_or("", String::as_str)
    }
}

type Handler = fn(&mut RestApiContext, &Args, Option<&Table>) -> Result<(), StepError>;

struct Definition {
    kind: StepKind,
    phrase: &'static str,
    handler: Handler,
}

const fn def(kind: StepKind, phrase: &'static str, handler: Handler) -> Definition {
    Definition {
        kind,
        phrase,
        handler,
    }
}

fn require_table<'a>(table: Option<&'a Table>, phrase: &str) -> Result<&'a Table, StepError> {
    table.ok_or_else(|| StepError::MissingTable {
        step: phrase.to_owned(),
    })
}

#[rustfmt::skip]
const DEFINITIONS: &[Definition] = &[
    def(StepKind::Given, "I set header :name with value :value",
        |ctx, a, _| { ctx.set_header(a.at(0), a.at(1)); Ok(()) }),
    def(StepKind::Given, "I remove header :name",
        |ctx, a, _| { ctx.remove_header(a.at(0)); Ok(()) }),
    def(StepKind::When, "I make request :method :uri",
        |ctx, a, _| ctx.make_request(a.at(0), a.at(1))),
    def(StepKind::When, "I make request :method :uri with params:",
        |ctx, a, t| ctx.make_request_with_params(
            a.at(0), a.at(1), require_table(t, "I make request :method :uri with params:")?)),
    def(StepKind::Then, "the response should be JSON",
        |ctx, _, _| ctx.response_should_be_json()),
    def(StepKind::Then, "the response status code should be :code",
        |ctx, a, _| ctx.status_code_should_be(a.at(0))),
    def(StepKind::Then, "print last response",
        |ctx, _, _| ctx.print_last_response()),
    def(StepKind::Then, "the response JSON should be a collection",
        |ctx, _, _| ctx.response_should_be_collection()),
    def(StepKind::Then, "the response JSON should be a single object",
        |ctx, _, _| ctx.response_should_be_single_object()),
    def(StepKind::Then, "the response JSON should have :property field",
        |ctx, a, _| ctx.response_should_have_field(a.at(0))),
    def(StepKind::Then, "the response JSON should have :property field with value :expectedValue",
        |ctx, a, _| ctx.response_should_have_field_with_value(a.at(0), a.at(1))),
    def(StepKind::Then, "the response JSON should have :property field with exact value :expectedValue",
        |ctx, a, _| ctx.response_should_have_field_with_exact_value(a.at(0), a.at(1))),
    def(StepKind::Then, "the response JSON should have :property field matching :pattern",
        |ctx, a, _| ctx.response_should_have_field_matching(a.at(0), a.at(1))),
    def(StepKind::Then, "the response JSON should have :property field set to :expectedValue",
        |ctx, a, _| ctx.response_should_have_field_set_to(a.at(0), a.at(1))),
    def(StepKind::Then, "the response JSON should have :property fields with array :expectedArray as value",
        |ctx, a, _| ctx.response_should_have_field_with_array(a.at(0), a.at(1))),
    def(StepKind::Then, "the response JSON should have nested :nestedFieldName field with value :expectedValue",
        |ctx, a, _| ctx.response_should_have_nested_field_with_value(a.at(0), a.at(1))),
    def(StepKind::Then, "the response JSON :fieldName field should be a collection",
        |ctx, a, _| ctx.field_should_be_collection(a.at(0))),
    def(StepKind::Then, "the response collection should have :count items",
        |ctx, a, _| ctx.collection_should_have_count(a.at(0))),
    def(StepKind::Then, "the response collection should be empty",
        |ctx, _, _| ctx.collection_should_be_empty()),
    def(StepKind::Then, "the response collection should not be empty",
        |ctx, _, _| ctx.collection_should_not_be_empty()),
    def(StepKind::Then, "all response collection items should have :property field",
        |ctx, a, _| ctx.all_items_should_have_field(a.at(0))),
    def(StepKind::Then, "all response collection items should have :property field with value :expectedValue",
        |ctx, a, _| ctx.all_items_should_have_field_with_value(a.at(0), a.at(1))),
    def(StepKind::Then, "all response collection items should have nested field :property with value :expectedValue",
        |ctx, a, _| ctx.all_items_should_have_nested_field_with_value(a.at(0), a.at(1))),
    def(StepKind::Then, "all response collection items should have :property field set to :expectedBoolean",
        |ctx, a, _| ctx.all_items_should_have_field_set_to(a.at(0), a.at(1))),
    def(StepKind::Then, "at least one response collection item should have :property field with value :expectedValue",
        |ctx, a, _| ctx.at_least_one_item_should_have_field_with_value(a.at(0), a.at(1))),
    def(StepKind::Then, "all nested :collectionFieldName collection items should have :nestedFieldName field",
        |ctx, a, _| ctx.all_nested_items_should_have_field(a.at(0), a.at(1))),
    def(StepKind::Then, "all nested :collectionFieldName collection items should have :nestedFieldName field set to :expectedValue",
        |ctx, a, _| ctx.all_nested_items_should_have_field_set_to(a.at(0), a.at(1), a.at(2))),
    def(StepKind::Then, "all nested :collectionFieldName collection items should have :nestedFieldName field with value :expectedValue",
        |ctx, a, _| ctx.all_nested_items_should_have_field_with_value(a.at(0), a.at(1), a.at(2))),
    def(StepKind::Then, "all nested :collectionFieldName collection items should have nested :nestedFieldName field with value :expectedValue",
        |ctx, a, _| ctx.all_nested_items_should_have_nested_field_with_value(a.at(0), a.at(1), a.at(2))),
];

const KEYWORDS: [&str; 6] = ["Given ", "When ", "Then ", "And ", "But ", "* "];

/// Strip a leading Gherkin keyword from `text`.
#[must_use]
pub fn strip_keyword(text: &str) -> &str {
    let trimmed = text.trim();
    KEYWORDS
        .iter()
        .find_map(|keyword| trimmed.strip_prefix(keyword))
        .map_or(trimmed, str::trim_start)
}

struct Compiled {
    kind: StepKind,
    pattern: StepPattern,
    handler: Handler,
}

/// Compiled step vocabulary.
pub struct Steps {
    compiled: Vec<Compiled>,
}

impl std::fmt::Debug for Steps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Steps")
            .field("definitions", &self.compiled.len())
            .finish()
    }
}

impl Steps {
    /// Compile every phrase of the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidPhrase`] if a phrase fails to compile.
    pub fn new() -> Result<Self, StepError> {
        let compiled = DEFINITIONS
            .iter()
            .map(|definition| {
                Ok(Compiled {
                    kind: definition.kind,
                    pattern: StepPattern::compile(definition.phrase)?,
                    handler: definition.handler,
                })
            })
            .collect::<Result<_, StepError>>()?;
        Ok(Self { compiled })
    }

    /// Supported phrases with the keyword each is documented under.
    pub fn definitions(&self) -> impl Iterator<Item = (StepKind, &'static str)> + '_ {
        self.compiled
            .iter()
            .map(|entry| (entry.kind, entry.pattern.phrase()))
    }

    /// Match `text` against the vocabulary and run the step on `context`.
    ///
    /// A leading `Given`, `When`, `Then`, `And`, `But`, or `*` is ignored.
    /// Phrases are anchored at both ends, so each text matches at most one
    /// definition.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::UndefinedStep`] when nothing matches,
    /// [`StepError::MissingTable`] when a table-taking step has none, and
    /// otherwise whatever the step reports.
    pub fn run(
        &self,
        context: &mut RestApiContext,
        text: &str,
        table: Option<&Table>,
    ) -> Result<(), StepError> {
        let body = strip_keyword(text);
        let (entry, args) = self
            .compiled
            .iter()
            .find_map(|entry| entry.pattern.captures(body).map(|args| (entry, Args(args))))
            .ok_or_else(|| StepError::UndefinedStep {
                text: text.trim().to_owned(),
            })?;
        debug!(phrase = entry.pattern.phrase(), args = ?args.0, "dispatching step");
        (entry.handler)(context, &args, table)
    }
}
