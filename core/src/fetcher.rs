//! One-call facade: build, execute, parse, clean.
//!
//! `try_fetch_news` keeps success-with-nothing (`Ok(vec![])`) apart from
//! failure (`Err`). `fetch_news` collapses failure into an empty list after
//! logging it at error level, for callers that only want something to show.

use tracing::{error, info, instrument};

use crate::client::NewsClient;
use crate::config::NewsConfig;
use crate::error::FetchError;
use crate::normalize;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Article, FetchRequest};

#[derive(Debug, Clone)]
pub struct NewsFetcher<T = UreqTransport> {
    client: NewsClient,
    transport: T,
}

impl NewsFetcher<UreqTransport> {
    pub fn new(client: NewsClient) -> Self {
        Self::with_transport(client, UreqTransport::new())
    }

    pub fn from_config(config: &NewsConfig) -> Self {
        Self::new(NewsClient::new(&config.base_url, config.api_key.clone()))
    }
}

impl<T: Transport> NewsFetcher<T> {
    pub fn with_transport(client: NewsClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// Fetch and clean one page of headlines for `category`.
    ///
    /// Never fails: any error is logged and turned into an empty list.
    pub fn fetch_news(&self, category: &str, page_size: u32) -> Vec<Article> {
        self.fetch(&FetchRequest::new(category, page_size))
    }

    /// [`fetch_news`](Self::fetch_news) for a prepared request;
    /// `fetch(&FetchRequest::default())` asks for 20 technology headlines.
    pub fn fetch(&self, request: &FetchRequest) -> Vec<Article> {
        match self.try_fetch(request) {
            Ok(articles) => articles,
            Err(e) => {
                error!(error = %e, category = %request.category, "news fetch failed");
                Vec::new()
            }
        }
    }

    pub fn try_fetch_news(&self, category: &str, page_size: u32) -> Result<Vec<Article>, FetchError> {
        self.try_fetch(&FetchRequest::new(category, page_size))
    }

    #[instrument(level = "info", skip_all, fields(category = %request.category, page_size = request.page_size))]
    pub fn try_fetch(&self, request: &FetchRequest) -> Result<Vec<Article>, FetchError> {
        let http_request = self.client.build_top_headlines(request);
        let response = self.transport.execute(&http_request)?;
        let raw = self.client.parse_top_headlines(response)?;
        let received = raw.len();
        let articles = normalize::clean(raw);
        info!(received, kept = articles.len(), "cleaned top headlines");
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpRequest, HttpResponse};
    use std::cell::RefCell;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// In-memory sink for a test-scoped `tracing` subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with every log line at any level written to a string.
    fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        (out, text)
    }

    /// Returns a canned result and remembers the last request it saw.
    struct StubTransport {
        reply: Result<(u16, String), String>,
        seen: RefCell<Option<HttpRequest>>,
    }

    impl StubTransport {
        fn ok(status: u16, body: &str) -> Self {
            Self {
                reply: Ok((status, body.to_string())),
                seen: RefCell::new(None),
            }
        }

        fn unreachable() -> Self {
            Self {
                reply: Err("Connection refused".to_string()),
                seen: RefCell::new(None),
            }
        }
    }

    impl Transport for StubTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
            *self.seen.borrow_mut() = Some(request.clone());
            match &self.reply {
                Ok((status, body)) => Ok(HttpResponse {
                    status: *status,
                    headers: Vec::new(),
                    body: body.clone(),
                }),
                Err(msg) => Err(FetchError::Network(msg.clone())),
            }
        }
    }

    fn fetcher(transport: StubTransport) -> NewsFetcher<StubTransport> {
        NewsFetcher::with_transport(NewsClient::new("http://stub", "k"), transport)
    }

    #[test]
    fn single_article_gets_fallbacks() {
        let f = fetcher(StubTransport::ok(
            200,
            r#"{"articles":[{"title":"T1","url":"http://x","content":"a b c"}]}"#,
        ));
        let out = f.fetch_news("technology", 20);
        assert_eq!(out.len(), 1);
        let a = &out[0];
        assert_eq!(a.title, "T1");
        assert_eq!(a.url, "http://x");
        assert_eq!(a.description, normalize::FALLBACK_DESCRIPTION);
        assert_eq!(a.source, normalize::FALLBACK_SOURCE);
        assert_eq!(a.content_length, 5);
        assert_eq!(a.estimated_read_time, 1);
        assert_eq!(a.category, "general");
    }

    #[test]
    fn empty_title_yields_nothing() {
        let f = fetcher(StubTransport::ok(
            200,
            r#"{"articles":[{"title":"","url":"http://x"}]}"#,
        ));
        assert!(f.fetch_news("technology", 20).is_empty());
    }

    #[test]
    fn network_failure_is_empty_from_fetch_news() {
        let f = fetcher(StubTransport::unreachable());
        assert!(f.fetch_news("technology", 20).is_empty());
    }

    #[test]
    fn network_failure_is_logged_at_error_without_the_key() {
        let f = NewsFetcher::with_transport(
            NewsClient::new("http://stub", "sk-live-1234"),
            StubTransport::unreachable(),
        );
        let (out, logs) = with_captured_logs(|| f.fetch_news("science", 20));
        assert!(out.is_empty());
        assert!(logs.contains("ERROR"), "logs: {logs}");
        assert!(logs.contains("news fetch failed"), "logs: {logs}");
        assert!(logs.contains("network error: Connection refused"), "logs: {logs}");
        assert!(logs.contains("science"), "logs: {logs}");
        assert!(logs.contains("apiKey=***"), "logs: {logs}");
        assert!(!logs.contains("sk-live-1234"), "logs: {logs}");
    }

    #[test]
    fn successful_fetch_logs_no_error() {
        let f = fetcher(StubTransport::ok(200, r#"{"articles":[]}"#));
        let (_, logs) = with_captured_logs(|| f.fetch_news("science", 20));
        assert!(!logs.contains("news fetch failed"), "logs: {logs}");
        assert!(logs.contains("cleaned top headlines"), "logs: {logs}");
    }

    #[test]
    fn fetch_with_default_request_asks_for_twenty_technology() {
        let f = fetcher(StubTransport::ok(
            200,
            r#"{"articles":[{"title":"T","url":"http://t"}]}"#,
        ));
        let out = f.fetch(&FetchRequest::default());
        assert_eq!(out.len(), 1);
        let seen = f.transport.seen.borrow();
        let req = seen.as_ref().unwrap();
        assert_eq!(req.query_param("category"), Some("technology"));
        assert_eq!(req.query_param("pageSize"), Some("20"));
    }

    #[test]
    fn fetch_collapses_failure_to_empty() {
        let f = fetcher(StubTransport::unreachable());
        assert!(f.fetch(&FetchRequest::default()).is_empty());
    }

    #[test]
    fn network_failure_is_err_from_try_fetch_news() {
        let f = fetcher(StubTransport::unreachable());
        let err = f.try_fetch_news("technology", 20).unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[test]
    fn empty_page_is_ok_and_empty() {
        let f = fetcher(StubTransport::ok(200, r#"{"status":"ok","articles":[]}"#));
        let out = f.try_fetch_news("business", 20).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn status_error_collapses_to_empty() {
        let f = fetcher(StubTransport::ok(500, "oops"));
        assert!(f.fetch_news("technology", 20).is_empty());
        let err = f.try_fetch_news("technology", 20).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[test]
    fn request_carries_category_and_page_size() {
        let f = fetcher(StubTransport::ok(200, r#"{"articles":[]}"#));
        f.fetch_news("health", 7);
        let seen = f.transport.seen.borrow();
        let req = seen.as_ref().unwrap();
        assert_eq!(req.query_param("category"), Some("health"));
        assert_eq!(req.query_param("pageSize"), Some("7"));
        assert_eq!(req.query_param("country"), Some("us"));
        assert_eq!(req.query_param("apiKey"), Some("k"));
    }
}
