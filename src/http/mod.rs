//! HTTP adapter.
//!
//! The adapter translates step arguments into a [`Request`], hands it to an
//! [`HttpClient`] collaborator, and keeps the most recent [`Response`] for
//! the assertion steps that follow. A persistent [`HeaderSet`] is merged into
//! every request.

mod error;
mod headers;
mod locator;
mod method;
mod ureq_client;

pub use error::HttpError;
pub use headers::{
    HeaderSet, ServerHeaders, UNPREFIXED_HEADERS, server_headers, server_name, wire_name,
};
pub use locator::{BaseUrlLocator, IdentityLocator, PathLocator};
pub use method::{Method, UnknownMethod};
pub use ureq_client::UreqClient;

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::assertions::{AssertionError, render};

/// A single request parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Plain text value.
    Text(String),
    /// Sequence value, sent as `name[0]`, `name[1]`, ….
    List(Vec<Value>),
}

/// Request parameters in declaration order.
pub type Params = IndexMap<String, ParamValue>;

/// Flatten `params` into `(name, value)` pairs ready for a query string or
/// form body.
///
/// # Examples
///
/// ```rust
/// use restapi_steps::http::{ParamValue, Params, encode_params};
/// use serde_json::json;
///
/// let mut params = Params::new();
/// params.insert("q".into(), ParamValue::Text("ann".into()));
/// params.insert("ids".into(), ParamValue::List(vec![json!(1), json!("two")]));
/// let pairs = encode_params(&params);
/// assert_eq!(pairs[1], ("ids[0]".to_owned(), "1".to_owned()));
/// assert_eq!(pairs[2], ("ids[1]".to_owned(), "two".to_owned()));
/// ```
#[must_use]
pub fn encode_params(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .flat_map(|(name, value)| match value {
            ParamValue::Text(text) => vec![(name.clone(), text.clone())],
            ParamValue::List(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| (format!("{name}[{index}]"), render(item)))
                .collect(),
        })
        .collect()
}

/// Request handed to an [`HttpClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Request method.
    pub method: Method,
    /// URI after placeholder substitution and location.
    pub uri: String,
    /// Parameters in declaration order.
    pub params: Params,
    /// Merged headers in server-variable form.
    pub server: ServerHeaders,
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// Issues requests on behalf of the adapter.
pub trait HttpClient {
    /// Perform `request` and return the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] when no response could be obtained.
    fn request(&mut self, request: &Request) -> Result<Response, HttpError>;
}

/// Sends step requests and remembers the last response.
pub struct HttpAdapter {
    client: Box<dyn HttpClient>,
    locator: Box<dyn PathLocator>,
    headers: HeaderSet,
    last: Option<Response>,
}

impl fmt::Debug for HttpAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpAdapter")
            .field("headers", &self.headers)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

impl HttpAdapter {
    /// Wrap `client`, passing URIs through unchanged.
    #[must_use]
    pub fn new(client: impl HttpClient + 'static) -> Self {
        Self {
            client: Box::new(client),
            locator: Box::new(IdentityLocator),
            headers: HeaderSet::new(),
            last: None,
        }
    }

    /// Resolve URIs through `locator` instead.
    #[must_use]
    pub fn with_locator(mut self, locator: impl PathLocator + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    /// Start from `headers` as the persistent header set.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderSet) -> Self {
        self.headers = headers;
        self
    }

    /// Persistent headers merged into every request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Mutable access to the persistent headers.
    pub const fn headers_mut(&mut self) -> &mut HeaderSet {
        &mut self.headers
    }

    /// Send one request and store its response.
    ///
    /// `headers` override persistent headers of the same name. The previous
    /// response is discarded before sending, so a failed request leaves no
    /// response behind.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUri`] when the locator rejects `uri`, or
    /// whatever the client reports.
    pub fn send(
        &mut self,
        method: Method,
        uri: &str,
        params: Params,
        headers: &HeaderSet,
    ) -> Result<&Response, HttpError> {
        self.last = None;
        let request = Request {
            method,
            uri: self.locator.locate(uri)?,
            params,
            server: server_headers(&self.headers, headers),
        };
        debug!(
            method = %request.method,
            uri = %request.uri,
            params = request.params.len(),
            headers = request.server.len(),
            "sending request"
        );
        let response = self.client.request(&request)?;
        info!(
            method = %request.method,
            uri = %request.uri,
            status = response.status,
            "response received"
        );
        Ok(self.last.insert(response))
    }

    /// The most recent response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NoResponse`] before the first request.
    pub fn last_response(&self) -> Result<&Response, HttpError> {
        self.last.as_ref().ok_or(HttpError::NoResponse)
    }

    /// Raw body of the most recent response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NoResponse`] before the first request.
    pub fn last_response_body(&self) -> Result<&str, HttpError> {
        self.last_response().map(|response| response.body.as_str())
    }

    /// Body of the most recent response decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NoResponse`] before the first request, or
    /// [`AssertionError::JsonExpected`] (wrapped in [`HttpError::Decode`])
    /// when the body is not JSON or decodes to `null`.
    pub fn last_response_json(&self) -> Result<Value, HttpError> {
        let body = self.last_response_body()?;
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Null) | Err(_) => Err(AssertionError::JsonExpected.into()),
            Ok(document) => Ok(document),
        }
    }
}
