//! In-memory [`HttpClient`] for exercising steps without a network.
//!
//! Routes are registered per method and path; unmatched requests receive a
//! `404` JSON body. Clones share state, so a test can keep a handle after
//! moving the stub into a context and inspect what was sent.

use std::cell::RefCell;
use std::rc::Rc;

use restapi_steps::http::{HttpClient, HttpError, Method, Request, Response};
use serde_json::Value;

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    response: Response,
}

#[derive(Debug, Default)]
struct State {
    routes: Vec<Route>,
    requests: Vec<Request>,
    offline: bool,
}

/// Scriptable API double.
///
/// # Examples
///
/// ```rust
/// use restapi_steps::http::Method;
/// use restapi_steps::{RestApiContext, ScenarioConfig};
/// use test_support::StubApi;
///
/// let api = StubApi::new();
/// api.respond(Method::Get, "/ping", 200, r#"{"ok": true}"#);
/// let mut context = RestApiContext::new(api.clone(), ScenarioConfig::default());
/// context.make_request("GET", "/ping").expect("stubbed request");
/// assert_eq!(api.requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubApi {
    state: Rc<RefCell<State>>,
}

impl StubApi {
    /// Create a stub with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and `body`. Later registrations
    /// for the same route win.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        state
            .routes
            .retain(|route| !(route.method == method && route.path == path));
        state.routes.push(Route {
            method,
            path: path.to_owned(),
            response: Response {
                status,
                body: body.into(),
            },
        });
    }

    /// Answer `method path` with `status` and `document` serialised as JSON.
    pub fn respond_json(&self, method: Method, path: &str, status: u16, document: &Value) {
        self.respond(method, path, status, document.to_string());
    }

    /// Make every following request fail with a transport error.
    pub fn go_offline(&self) {
        self.state.borrow_mut().offline = true;
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.state.borrow().requests.clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<Request> {
        self.state.borrow().requests.last().cloned()
    }
}

impl HttpClient for StubApi {
    fn request(&mut self, request: &Request) -> Result<Response, HttpError> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());
        if state.offline {
            return Err(HttpError::Transport {
                method: request.method.to_string(),
                url: request.uri.clone(),
                reason: String::from("stub is offline"),
            });
        }
        let path = request
            .uri
            .split_once('?')
            .map_or(request.uri.as_str(), |(path, _)| path);
        let response = state
            .routes
            .iter()
            .find(|route| route.method == request.method && route.path == path)
            .map_or_else(
                || Response {
                    status: 404,
                    body: String::from(r#"{"error": "not found"}"#),
                },
                |route| route.response.clone(),
            );
        Ok(response)
    }
}
