//! Turns raw NewsAPI articles into `Article` records.
//!
//! Articles without a title or url are dropped. Everything else is kept in
//! input order with fallbacks filled in.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::types::{Article, RawArticle};

pub const WORDS_PER_MINUTE: usize = 500;
pub const FALLBACK_DESCRIPTION: &str = "no description available";
pub const FALLBACK_SOURCE: &str = "unknown source";
pub const FALLBACK_CATEGORY: &str = "general";

/// Clean a page of raw articles, stamping missing publish times with now.
pub fn clean(raw_articles: Vec<RawArticle>) -> Vec<Article> {
    clean_at(raw_articles, Utc::now())
}

/// Same as [`clean`] with an explicit clock for the `published_at` fallback.
pub fn clean_at(raw_articles: Vec<RawArticle>, now: DateTime<Utc>) -> Vec<Article> {
    let fallback_time = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    raw_articles
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let article = clean_one(raw, &fallback_time);
            if article.is_none() {
                debug!(index, "dropping article without title or url");
            }
            article
        })
        .collect()
}

fn clean_one(raw: RawArticle, fallback_time: &str) -> Option<Article> {
    let title = raw.title.filter(|t| !t.is_empty())?;
    let url = raw.url.filter(|u| !u.is_empty())?;
    let content = raw.content.unwrap_or_default();

    Some(Article {
        title,
        description: raw
            .description
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
        url,
        source: raw
            .source
            .and_then(|s| s.name)
            .unwrap_or_else(|| FALLBACK_SOURCE.to_string()),
        published_at: raw
            .published_at
            .unwrap_or_else(|| fallback_time.to_string()),
        content_length: content.chars().count(),
        estimated_read_time: estimated_read_time(&content),
        category: raw
            .category
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string()),
    })
}

/// Whole minutes to read `content`, never less than one.
pub fn estimated_read_time(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    let minutes = (words / WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
