use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use trendscope_core::{CoreError, RedditApiError, SocialPost};

pub const SEARCH_SCOPE: &str = "all";
pub const SEARCH_SORT: &str = "hot";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub title: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub permalink: String,
}

impl From<RedditPostData> for SocialPost {
    fn from(post_data: RedditPostData) -> Self {
        Self {
            title: post_data.title,
            score: post_data.score,
            url: post_data.url,
        }
    }
}

/// `GET /r/all/search` with the caller's bearer token.
pub async fn search_posts(
    http_client: &Client,
    api_base: &str,
    access_token: &str,
    query: &str,
    limit: usize,
) -> Result<RedditListing<RedditPostData>, CoreError> {
    let endpoint = format!("/r/{}/search", SEARCH_SCOPE);
    let url = format!("{}{}", api_base.trim_end_matches('/'), endpoint);
    let limit_str = limit.to_string();

    let params = [
        ("q", query),
        ("sort", SEARCH_SORT),
        ("limit", limit_str.as_str()),
        ("restrict_sr", "false"),
        ("t", "all"),
        ("raw_json", "1"),
    ];

    info!("Making Reddit API request: GET {}", endpoint);
    let response = match http_client
        .get(&url)
        .bearer_auth(access_token)
        .query(&params)
        .send()
        .await
    {
        Ok(response) => check_status(response, &endpoint)?,
        Err(e) => {
            error!("Network error for GET {}: {}", endpoint, e);
            if e.is_timeout() {
                return Err(CoreError::RedditApi(RedditApiError::RequestTimeout));
            }
            return Err(CoreError::Network(e));
        }
    };

    let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
        error!("Failed to parse search results: {}", e);
        CoreError::RedditApi(RedditApiError::InvalidResponse {
            details: format!("Failed to parse search results for '{}'", query),
        })
    })?;

    debug!(
        "Retrieved {} posts from r/{} search",
        listing.data.children.len(),
        SEARCH_SCOPE
    );
    Ok(listing)
}

fn check_status(response: Response, endpoint: &str) -> Result<Response, CoreError> {
    let status = response.status();
    if status.is_success() {
        debug!("Request successful: {} {}", status, endpoint);
        return Ok(response);
    }

    error!("Request failed with status: {} for {}", status, endpoint);
    let error = match status {
        StatusCode::TOO_MANY_REQUESTS => {
            warn!("Rate limited by Reddit");
            RedditApiError::RateLimitExceeded
        }
        StatusCode::UNAUTHORIZED => RedditApiError::InvalidToken,
        StatusCode::FORBIDDEN => RedditApiError::Forbidden {
            resource: endpoint.to_string(),
        },
        s if s.is_server_error() => RedditApiError::ServerError {
            status_code: s.as_u16(),
        },
        s => RedditApiError::InvalidResponse {
            details: format!("unexpected status {}", s.as_u16()),
        },
    };
    Err(CoreError::RedditApi(error))
}
