use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use gazette_core::Article;
use gazette_scraper::{BatchOrigin, ScraperError};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const URL_REQUIRED: &str = "URL is required";

#[derive(Debug, Serialize)]
pub(super) struct ArticlesResponse {
    success: bool,
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContentRequest {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ContentResponse {
    success: bool,
    content: String,
}

pub(super) async fn list_articles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ArticlesResponse> {
    let batch = state.scraper.fetch_articles(state.source).await;
    tracing::info!(
        request_id = %req_id.0,
        count = batch.articles.len(),
        fallback = batch.origin == BatchOrigin::Fallback,
        "served article list"
    );

    Json(ArticlesResponse {
        success: true,
        articles: batch.articles,
    })
}

pub(super) async fn article_content(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
    let url = payload
        .ok()
        .and_then(|Json(body)| body.url)
        .map(|url| url.trim().to_owned())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::bad_request(URL_REQUIRED))?;

    let content = state
        .scraper
        .fetch_article_content(&url)
        .await
        .map_err(|e| map_scraper_error(&req_id, &url, &e))?;

    Ok(Json(ContentResponse {
        success: true,
        content,
    }))
}

fn map_scraper_error(req_id: &RequestId, url: &str, error: &ScraperError) -> ApiError {
    match error {
        ScraperError::InvalidUrl { .. } => ApiError::bad_request(error.to_string()),
        _ => {
            tracing::error!(request_id = %req_id.0, url, error = %error, "article content fetch failed");
            ApiError::internal(error.to_string())
        }
    }
}
