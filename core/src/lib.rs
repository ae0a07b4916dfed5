//! Synchronous client for the NewsAPI top-headlines endpoint.
//!
//! # Overview
//! Fetches one page of top headlines for a category and cleans each article
//! into a display-ready `Article`: articles without a title or url are
//! dropped, missing fields get fallbacks, and a reading-time estimate is
//! derived from the content.
//!
//! # Design
//! - `NewsClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern).
//! - `Transport` performs the round-trip; `UreqTransport` is the default.
//! - `normalize` is a pure function over the raw article list.
//! - `NewsFetcher` ties the three together and offers both a `Result`
//!   returning call and a log-and-return-empty call.
//! - The API key is injected through `NewsClient::new`; only `config`
//!   reads the environment.

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod normalize;
pub mod transport;
pub mod types;

pub use client::NewsClient;
pub use config::NewsConfig;
pub use error::{ConfigError, FetchError};
pub use fetcher::NewsFetcher;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use normalize::{clean, clean_at, estimated_read_time};
pub use transport::{Transport, UreqTransport};
pub use types::{Article, Category, FetchRequest, RawArticle, RawSource, TopHeadlinesResponse};
