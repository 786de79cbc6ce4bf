//! Production [`HttpClient`] built on `ureq`.

use std::time::Duration;

use tracing::warn;
use url::Url;

use super::{HttpClient, HttpError, Request, Response, encode_params};

/// Blocking client backed by a shared `ureq` agent.
///
/// Parameters of `GET`, `HEAD`, and `DELETE` requests travel in the query
/// string; other methods send them as a URL-encoded form body. Non-2xx
/// statuses are returned as responses.
#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    /// Build a client with the given connect and overall timeouts.
    #[must_use]
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout(timeout)
            .build();
        Self { agent }
    }
}

impl HttpClient for UreqClient {
    fn request(&mut self, request: &Request) -> Result<Response, HttpError> {
        let url = Url::parse(&request.uri).map_err(|err| HttpError::InvalidUri {
            uri: request.uri.clone(),
            reason: err.to_string(),
        })?;
        let mut call = self.agent.request_url(request.method.as_str(), &url);
        for (name, value) in request.server.wire_headers() {
            if name.eq_ignore_ascii_case("Content-Length") {
                warn!(value, "ignoring Content-Length header; the client computes it");
                continue;
            }
            call = call.set(&name, value);
        }

        let pairs = encode_params(&request.params);
        let outcome = if request.method.sends_query() || pairs.is_empty() {
            for (name, value) in &pairs {
                call = call.query(name, value);
            }
            call.call()
        } else {
            let form: Vec<(&str, &str)> = pairs
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();
            call.send_form(&form)
        };

        let response = match outcome {
            Ok(response) | Err(ureq::Error::Status(_, response)) => response,
            Err(err @ ureq::Error::Transport(_)) => {
                return Err(HttpError::Transport {
                    method: request.method.to_string(),
                    url: url.into(),
                    reason: err.to_string(),
                });
            }
        };
        let status = response.status();
        let body = response.into_string().map_err(|err| HttpError::ReadBody {
            url: request.uri.clone(),
            reason: err.to_string(),
        })?;
        Ok(Response { status, body })
    }
}
