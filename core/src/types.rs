//! Wire DTOs for the NewsAPI top-headlines endpoint and the cleaned record
//! handed to callers.
//!
//! # Design
//! The raw types decode leniently: a field that is missing, null, or of the
//! wrong JSON type becomes `None`, and an `articles` element that is not an
//! object is dropped. A single malformed article never fails the whole page.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Country sent with every request.
pub const COUNTRY: &str = "us";
pub const DEFAULT_CATEGORY: &str = "technology";
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Parameters for one top-headlines call. The API key is not part of the
/// request; it belongs to the `NewsClient` that builds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub category: String,
    pub page_size: u32,
}

impl FetchRequest {
    pub fn new(category: impl Into<String>, page_size: u32) -> Self {
        Self {
            category: category.into(),
            page_size,
        }
    }
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY, DEFAULT_PAGE_SIZE)
    }
}

/// Topic categories NewsAPI understands for top headlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
                format!("unknown category '{s}', expected one of: {}", known.join(", "))
            })
    }
}

/// Body of a top-headlines response, success or error envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopHeadlinesResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, rename = "totalResults", deserialize_with = "lenient")]
    pub total_results: Option<u64>,
    #[serde(default, deserialize_with = "lenient_articles")]
    pub articles: Vec<RawArticle>,
    #[serde(default, deserialize_with = "lenient")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

/// One article exactly as NewsAPI sent it. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawArticle {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub source: Option<RawSource>,
    #[serde(default, rename = "publishedAt", deserialize_with = "lenient")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSource {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// A cleaned, display-ready article.
///
/// `title` and `url` are always non-empty; every other field has been
/// defaulted if the source omitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub published_at: String,
    pub content_length: usize,
    pub estimated_read_time: u32,
    pub category: String,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_articles<'de, D>(deserializer: D) -> Result<Vec<RawArticle>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
