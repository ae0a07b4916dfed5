//! Executes an `HttpRequest` and hands back an `HttpResponse`.

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one blocking HTTP round-trip.
///
/// Any response that arrives, whatever its status, is `Ok`; status
/// interpretation belongs to `NewsClient::parse_top_headlines`. `Err` means no
/// response was obtained.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// `ureq`-backed transport using the agent's default timeouts.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // 4xx/5xx come back as data so NewsAPI error bodies can be read.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(request.url.as_str()),
        };
        for (key, value) in &request.query {
            builder = builder.query(key, value);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
            .call()
            .map_err(|e| network_error(e, request))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(body_read_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// ureq may echo the request URI, which carries the key.
fn network_error(err: ureq::Error, request: &HttpRequest) -> FetchError {
    let mut msg = err.to_string();
    if let Some(key) = request.query_param("apiKey").filter(|k| !k.is_empty()) {
        msg = msg.replace(key, "***");
    }
    FetchError::Network(msg)
}

/// A body that arrived but cannot be used (too large, not UTF-8) is a decode
/// failure; anything else during the read is the connection dropping.
fn body_read_error(err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::BodyExceedsLimit(limit) => {
            FetchError::Decode(format!("response body exceeds {limit} bytes"))
        }
        ureq::Error::Io(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            FetchError::Decode(format!("response body is not valid UTF-8: {e}"))
        }
        other => FetchError::Network(other.to_string()),
    }
}
