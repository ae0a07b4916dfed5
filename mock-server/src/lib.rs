use std::{collections::BTreeMap, collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const TEST_API_KEY: &str = "test-key";
pub const MAX_PAGE_SIZE: usize = 100;
const DEFAULT_PAGE_SIZE: usize = 20;

/// Articles served per category, in the order they are returned.
pub type Headlines = BTreeMap<String, Vec<Value>>;

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
    headlines: Arc<Headlines>,
}

pub fn app() -> Router {
    app_with(TEST_API_KEY, default_headlines())
}

pub fn app_with(api_key: &str, headlines: Headlines) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        headlines: Arc::new(headlines),
    };
    Router::new()
        .route("/v2/top-headlines", get(top_headlines))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

/// Serve `headlines` behind `api_key` instead of the default fixtures.
pub async fn serve_with(
    listener: TcpListener,
    api_key: &str,
    headlines: Headlines,
) -> Result<(), std::io::Error> {
    serve(listener, app_with(api_key, headlines)).await
}

async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

/// A small fixture set with a mix of complete and partial articles.
pub fn default_headlines() -> Headlines {
    let mut headlines = Headlines::new();
    headlines.insert(
        "technology".to_string(),
        vec![
            json!({
                "source": {"id": "the-verge", "name": "The Verge"},
                "author": "Jane Doe",
                "title": "New chip doubles battery life",
                "description": "A look at the latest low-power silicon.",
                "url": "https://example.com/tech/chip",
                "urlToImage": null,
                "publishedAt": "2024-05-01T10:00:00Z",
                "content": "Engineers unveiled a chip that sips power [+1200 chars]"
            }),
            json!({
                "source": {"id": null, "name": null},
                "title": null,
                "url": "https://example.com/tech/untitled",
                "content": "no headline here"
            }),
            json!({
                "source": {"id": null, "name": "Ars Technica"},
                "title": "Rust ships a new edition",
                "description": null,
                "url": "https://example.com/tech/rust",
                "publishedAt": null,
                "content": null
            }),
            json!({
                "title": "Link went missing",
                "url": ""
            }),
        ],
    );
    let long_read = vec!["word"; 1200].join(" ");
    headlines.insert(
        "science".to_string(),
        vec![json!({
            "source": {"id": "nature", "name": "Nature"},
            "title": "Comet visible this weekend",
            "description": "Look north after sunset.",
            "url": "https://example.com/science/comet",
            "publishedAt": "2024-05-02T18:30:00Z",
            "content": long_read
        })],
    );
    headlines
}

async fn top_headlines(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    match params.get("apiKey").map(String::as_str) {
        None | Some("") => {
            return error_response(
                "apiKeyMissing",
                "Your API key is missing. Append this to the URL with the apiKey param.",
            )
        }
        Some(key) if key != &*state.api_key => {
            return error_response(
                "apiKeyInvalid",
                "Your API key is invalid or incorrect.",
            )
        }
        Some(_) => {}
    }

    let page_size = params
        .get("pageSize")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);

    let matching: Vec<&Value> = match params.get("category") {
        Some(category) => state
            .headlines
            .get(category)
            .map(|articles| articles.iter().collect())
            .unwrap_or_default(),
        None => state.headlines.values().flatten().collect(),
    };

    let page: Vec<Value> = matching.iter().take(page_size).map(|v| (*v).clone()).collect();
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "totalResults": matching.len(),
            "articles": page,
        })),
    )
}

fn error_response(code: &str, message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "status": "error",
            "code": code,
            "message": message,
        })),
    )
}
