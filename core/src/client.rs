//! Stateless request builder and response parser for the top-headlines
//! endpoint.
//!
//! # Design
//! `NewsClient` holds the base URL and the API key it was constructed with
//! and nothing else. `build_top_headlines` produces an `HttpRequest`,
//! `parse_top_headlines` consumes an `HttpResponse`; whoever sits in between
//! does the I/O.

use serde_json::Value;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{FetchRequest, RawArticle, TopHeadlinesResponse, COUNTRY};

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";
pub const TOP_HEADLINES_PATH: &str = "/v2/top-headlines";

/// Builds top-headlines requests and parses their responses.
///
/// The API key is taken as given. An empty key is not rejected here; NewsAPI
/// answers it with an `apiKeyMissing` error.
#[derive(Clone)]
pub struct NewsClient {
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}

impl NewsClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn build_top_headlines(&self, request: &FetchRequest) -> HttpRequest {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{TOP_HEADLINES_PATH}", self.base_url),
            query: vec![
                ("category".to_string(), request.category.clone()),
                ("pageSize".to_string(), request.page_size.to_string()),
                ("country".to_string(), COUNTRY.to_string()),
                ("apiKey".to_string(), self.api_key.clone()),
            ],
            headers: vec![("accept".to_string(), "application/json".to_string())],
        };
        debug!(url = %req.redacted_url(), "built top-headlines request");
        req
    }

    /// Extract the raw `articles` array from a response.
    ///
    /// A missing `articles` key on a successful response yields an empty
    /// list, not an error. A body that is not a JSON object is a decode error.
    pub fn parse_top_headlines(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<RawArticle>, FetchError> {
        check_status(&response)?;
        let body = decode_body(&response.body)?;
        if let Some(err) = api_error(&body) {
            return Err(err);
        }
        info!(
            total_results = ?body.total_results,
            returned = body.articles.len(),
            "received top headlines"
        );
        Ok(body.articles)
    }
}

/// Serde's derived struct impl also accepts a positional JSON array, so the
/// object shape is checked on the `Value` first.
fn decode_body(body: &str) -> Result<TopHeadlinesResponse, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    if !value.is_object() {
        return Err(FetchError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Map a non-2xx response to the NewsAPI error envelope when the body holds
/// one, else to a plain status error.
fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    let envelope = decode_body(&response.body).ok();
    if let Some(err) = envelope.as_ref().and_then(api_error) {
        return Err(err);
    }
    Err(FetchError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

fn api_error(body: &TopHeadlinesResponse) -> Option<FetchError> {
    if body.status.as_deref() != Some("error") {
        return None;
    }
    Some(FetchError::Api {
        code: body.code.clone().unwrap_or_else(|| "unknown".to_string()),
        message: body
            .message
            .clone()
            .unwrap_or_else(|| "no message".to_string()),
    })
}
