//! Per-scenario step context.
//!
//! [`RestApiContext`] owns the HTTP adapter, the persistent headers, and the
//! placeholder substitutor for one scenario. Every method implements one
//! step phrase: it interprets the captured arguments, optionally resolves
//! them through the substitutor, and delegates to the adapter or to the
//! assertion engine.

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::assertions::{self, AssertionError, CompareMode};
use crate::config::{ConfigError, RestApiConfig};
use crate::http::{
    BaseUrlLocator, HeaderSet, HttpAdapter, HttpClient, Method, ParamValue, Params, PathLocator,
    Response, UreqClient,
};
use crate::literal::{looks_like_collection, parse_literal};
use crate::params::{ParameterBag, Substitutor};
use crate::steps::{StepError, Table};

/// Settings fixed for the lifetime of a scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioConfig {
    /// Headers sent with every request.
    pub headers: HeaderSet,
}

/// Step implementations bound to one scenario's state.
pub struct RestApiContext {
    http: HttpAdapter,
    substitutor: Box<dyn Substitutor>,
}

impl fmt::Debug for RestApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestApiContext")
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}

impl RestApiContext {
    /// Build a context around `client` with an empty [`ParameterBag`].
    #[must_use]
    pub fn new(client: impl HttpClient + 'static, scenario: ScenarioConfig) -> Self {
        Self {
            http: HttpAdapter::new(client).with_headers(scenario.headers),
            substitutor: Box::new(ParameterBag::default()),
        }
    }

    /// Build a `ureq`-backed context from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BaseUrl`] when the configured base URL is not
    /// an absolute URL.
    pub fn from_config(config: &RestApiConfig) -> Result<Self, ConfigError> {
        let client = UreqClient::new(
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.timeout_secs),
        );
        let scenario = ScenarioConfig {
            headers: config.headers.iter().collect(),
        };
        let context = Self::new(client, scenario);
        match config.base_url.as_deref() {
            Some(base) => {
                let locator = BaseUrlLocator::new(base).map_err(ConfigError::BaseUrl)?;
                Ok(context.with_locator(locator))
            }
            None => Ok(context),
        }
    }

    /// Resolve request URIs through `locator`.
    #[must_use]
    pub fn with_locator(mut self, locator: impl PathLocator + 'static) -> Self {
        self.http = self.http.with_locator(locator);
        self
    }

    /// Resolve placeholders through `substitutor` instead of an empty bag.
    #[must_use]
    pub fn with_substitutor(mut self, substitutor: impl Substitutor + 'static) -> Self {
        self.substitutor = Box::new(substitutor);
        self
    }

    /// The underlying HTTP adapter.
    #[must_use]
    pub const fn http(&self) -> &HttpAdapter {
        &self.http
    }

    /// Resolve placeholders in `text`.
    #[must_use]
    pub fn substitute(&self, text: &str) -> String {
        self.substitutor.replace(text)
    }

    fn document(&self) -> Result<Value, StepError> {
        Ok(self.http.last_response_json()?)
    }

    fn request(&mut self, method: &str, uri: &str, params: Params) -> Result<(), StepError> {
        let parsed = method
            .parse::<Method>()
            .map_err(|err| StepError::invalid_argument("method", method, err))?;
        let resolved = self.substitute(uri);
        self.http
            .send(parsed, &resolved, params, &HeaderSet::new())?;
        Ok(())
    }

    /// `When I make request :method :uri`
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidArgument`] for an unknown method, or the
    /// adapter's failure.
    pub fn make_request(&mut self, method: &str, uri: &str) -> Result<(), StepError> {
        self.request(method, uri, Params::new())
    }

    /// `When I make request :method :uri with params:`
    ///
    /// Values shaped like `array(...)` or `[...]` are sent as sequences; other
    /// values are substituted and sent as text.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidTable`] for a table that is not two
    /// columns wide, [`StepError::InvalidArgument`] for a malformed sequence
    /// literal, or the adapter's failure.
    pub fn make_request_with_params(
        &mut self,
        method: &str,
        uri: &str,
        table: &Table,
    ) -> Result<(), StepError> {
        let mut params = Params::new();
        for (field, value) in table.rows_hash()? {
            let param = if looks_like_collection(&value) {
                let items = parse_literal(&value)
                    .map_err(|err| StepError::invalid_argument("params value", &value, err))?;
                ParamValue::List(items)
            } else {
                ParamValue::Text(self.substitute(&value))
            };
            params.insert(field, param);
        }
        self.request(method, uri, params)
    }

    /// `Given I set header :name with value :value`
    ///
    /// The value is substituted. The header is sent with every later request
    /// of the scenario.
    pub fn set_header(&mut self, name: &str, value: &str) {
        let resolved = self.substitute(value);
        debug!(header = name, "setting persistent header");
        self.http.headers_mut().set(name, resolved);
    }

    /// `Given I remove header :name`
    pub fn remove_header(&mut self, name: &str) {
        if self.http.headers_mut().remove(name).is_none() {
            debug!(header = name, "header was not set");
        }
    }

    /// `Then the response should be JSON`
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::JsonExpected`] when the body does not decode
    /// to a non-null JSON value.
    pub fn response_should_be_json(&self) -> Result<(), StepError> {
        self.document().map(|_| ())
    }

    /// `Then the response status code should be :code`
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidArgument`] when `code` is not a status code
    /// and [`AssertionError::UnexpectedStatus`] on mismatch.
    pub fn status_code_should_be(&self, code: &str) -> Result<(), StepError> {
        let expected = code
            .trim()
            .parse::<u16>()
            .map_err(|err| StepError::invalid_argument("status code", code, err))?;
        let actual = self.http.last_response()?.status;
        if actual == expected {
            Ok(())
        } else {
            Err(AssertionError::UnexpectedStatus { expected, actual }.into())
        }
    }

    /// `Then print last response`
    ///
    /// # Errors
    ///
    /// Returns [`crate::http::HttpError::NoResponse`] before any request.
    pub fn print_last_response(&self) -> Result<(), StepError> {
        let Response { status, body } = self.http.last_response()?;
        info!(status, body = body.as_str(), "last response");
        Ok(())
    }

    /// `Then the response JSON should be a collection`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn response_should_be_collection(&self) -> Result<(), StepError> {
        Ok(assertions::is_collection(&self.document()?)?)
    }

    /// `Then the response JSON should be a single object`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn response_should_be_single_object(&self) -> Result<(), StepError> {
        Ok(assertions::is_single_object(&self.document()?)?)
    }

    /// `Then the response JSON should have :property field`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn response_should_have_field(&self, property: &str) -> Result<(), StepError> {
        Ok(assertions::has_property(&self.document()?, property)?)
    }

    /// `Then the response JSON should have :property field with value
    /// :expectedValue`
    ///
    /// The expected value is substituted and compared loosely.
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn response_should_have_field_with_value(
        &self,
        property: &str,
        expected: &str,
    ) -> Result<(), StepError> {
        let resolved = Value::String(self.substitute(expected));
        Ok(assertions::has_property_with_value(
            &self.document()?,
            property,
            &resolved,
            CompareMode::Loose,
        )?)
    }

    /// `Then the response JSON should have :property field with exact value
    /// :expectedValue`
    ///
    /// The expected value is substituted and must equal a string property
    /// exactly.
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn response_should_have_field_with_exact_value(
        &self,
        property: &str,
        expected: &str,
    ) -> Result<(), StepError> {
        let resolved = Value::String(self.substitute(expected));
        Ok(assertions::has_property_with_value(
            &self.document()?,
            property,
            &resolved,
            CompareMode::Exact,
        )?)
    }

    /// `Then the response JSON should have :property field matching :pattern`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure, including
    /// [`AssertionError::InvalidPattern`].
    pub fn response_should_have_field_matching(
        &self,
        property: &str,
        pattern: &str,
    ) -> Result<(), StepError> {
        Ok(assertions::has_property_with_value(
            &self.document()?,
            property,
            &Value::String(pattern.to_owned()),
            CompareMode::RegexLike,
        )?)
    }

    /// `Then the response JSON should have :property field set to
    /// :expectedValue`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn response_should_have_field_set_to(
        &self,
        property: &str,
        token: &str,
    ) -> Result<(), StepError> {
        Ok(assertions::has_property_with_boolean(
            &self.document()?,
            property,
            token,
        )?)
    }

    /// `Then the response JSON should have :property fields with array
    /// :expectedArray as value`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn response_should_have_field_with_array(
        &self,
        property: &str,
        literal: &str,
    ) -> Result<(), StepError> {
        Ok(assertions::has_property_with_array_value(
            &self.document()?,
            property,
            literal,
        )?)
    }

    /// `Then the response JSON should have nested :nestedFieldName field with
    /// value :expectedValue`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn response_should_have_nested_field_with_value(
        &self,
        path: &str,
        expected: &str,
    ) -> Result<(), StepError> {
        let resolved = Value::String(self.substitute(expected));
        Ok(assertions::has_nested_property_with_value(
            &self.document()?,
            path,
            &resolved,
            CompareMode::Exact,
        )?)
    }

    /// `Then the response JSON :fieldName field should be a collection`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn field_should_be_collection(&self, field: &str) -> Result<(), StepError> {
        Ok(assertions::field_is_collection(&self.document()?, field)?)
    }

    /// `Then the response collection should have :count items`
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidArgument`] when `count` is not a
    /// non-negative integer, or the assertion failure.
    pub fn collection_should_have_count(&self, count: &str) -> Result<(), StepError> {
        let expected = count
            .trim()
            .parse::<usize>()
            .map_err(|err| StepError::invalid_argument("count", count, err))?;
        Ok(assertions::collection_item_count(
            &self.document()?,
            expected,
        )?)
    }

    /// `Then the response collection should be empty`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn collection_should_be_empty(&self) -> Result<(), StepError> {
        Ok(assertions::collection_is_empty(&self.document()?)?)
    }

    /// `Then the response collection should not be empty`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn collection_should_not_be_empty(&self) -> Result<(), StepError> {
        Ok(assertions::collection_is_not_empty(&self.document()?)?)
    }

    /// `Then all response collection items should have :property field`
    ///
    /// # Errors
    ///
    /// Returns the first item failure.
    pub fn all_items_should_have_field(&self, property: &str) -> Result<(), StepError> {
        Ok(assertions::all_items_have_property(
            &self.document()?,
            property,
        )?)
    }

    /// `Then all response collection items should have :property field with
    /// value :expectedValue`
    ///
    /// # Errors
    ///
    /// Returns the first item failure.
    pub fn all_items_should_have_field_with_value(
        &self,
        property: &str,
        expected: &str,
    ) -> Result<(), StepError> {
        Ok(assertions::all_items_have_value(
            &self.document()?,
            property,
            &Value::String(expected.to_owned()),
            CompareMode::Loose,
        )?)
    }

    /// `Then all response collection items should have nested field :property
    /// with value :expectedValue`
    ///
    /// # Errors
    ///
    /// Returns the first item failure.
    pub fn all_items_should_have_nested_field_with_value(
        &self,
        path: &str,
        expected: &str,
    ) -> Result<(), StepError> {
        let resolved = Value::String(self.substitute(expected));
        Ok(assertions::all_items_have_nested_value(
            &self.document()?,
            path,
            &resolved,
            CompareMode::Exact,
        )?)
    }

    /// `Then all response collection items should have :property field set to
    /// :expectedBoolean`
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::EmptyCollection`] for an empty collection,
    /// otherwise the first item failure.
    pub fn all_items_should_have_field_set_to(
        &self,
        property: &str,
        token: &str,
    ) -> Result<(), StepError> {
        Ok(assertions::all_items_have_boolean(
            &self.document()?,
            property,
            token,
        )?)
    }

    /// `Then at least one response collection item should have :property
    /// field with value :expectedValue`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn at_least_one_item_should_have_field_with_value(
        &self,
        property: &str,
        expected: &str,
    ) -> Result<(), StepError> {
        let resolved = Value::String(self.substitute(expected));
        Ok(assertions::at_least_one_item_has_value(
            &self.document()?,
            property,
            &resolved,
            CompareMode::Loose,
        )?)
    }

    /// `Then all nested :collectionFieldName collection items should have
    /// :nestedFieldName field`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn all_nested_items_should_have_field(
        &self,
        collection: &str,
        field: &str,
    ) -> Result<(), StepError> {
        Ok(assertions::all_nested_items_have_property(
            &self.document()?,
            collection,
            field,
        )?)
    }

    /// `Then all nested :collectionFieldName collection items should have
    /// :nestedFieldName field set to :expectedValue`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn all_nested_items_should_have_field_set_to(
        &self,
        collection: &str,
        field: &str,
        token: &str,
    ) -> Result<(), StepError> {
        Ok(assertions::all_nested_items_have_boolean(
            &self.document()?,
            collection,
            field,
            token,
        )?)
    }

    /// `Then all nested :collectionFieldName collection items should have
    /// :nestedFieldName field with value :expectedValue`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn all_nested_items_should_have_field_with_value(
        &self,
        collection: &str,
        field: &str,
        expected: &str,
    ) -> Result<(), StepError> {
        Ok(assertions::all_nested_items_have_value(
            &self.document()?,
            collection,
            field,
            &Value::String(expected.to_owned()),
            CompareMode::Loose,
        )?)
    }

    /// `Then all nested :collectionFieldName collection items should have
    /// nested :nestedFieldName field with value :expectedValue`
    ///
    /// # Errors
    ///
    /// Returns the assertion failure.
    pub fn all_nested_items_should_have_nested_field_with_value(
        &self,
        collection: &str,
        path: &str,
        expected: &str,
    ) -> Result<(), StepError> {
        let resolved = Value::String(self.substitute(expected));
        Ok(assertions::all_nested_items_have_nested_value(
            &self.document()?,
            collection,
            path,
            &resolved,
            CompareMode::Exact,
        )?)
    }
}
