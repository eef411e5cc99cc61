pub mod api;
pub mod auth;


pub use auth::RedditOAuth2Config;

use reqwest::Client;
use tracing::{info, warn};
use trendscope_core::{
    AppConfig, CoreError, ErrorExt, RedditApiError, SocialFeed, SocialPost, SocialSource,
};

/// Keyword search across all of Reddit, authenticated app-only.
#[derive(Debug, Clone)]
pub struct RedditClient {
    http_client: Client,
    oauth: Option<RedditOAuth2Config>,
    api_base: String,
    user_agent: String,
}

impl RedditClient {
    pub fn new(config: &AppConfig) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(config.reddit_user_agent.as_str())
            .build()?;

        let oauth = config.reddit_credentials().map(|(id, secret)| {
            RedditOAuth2Config::new(
                id.to_string(),
                secret.to_string(),
                config.reddit_auth_url.clone(),
            )
        });

        Ok(Self {
            http_client,
            oauth,
            api_base: config.reddit_api_base.clone(),
            user_agent: config.reddit_user_agent.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.oauth.is_some()
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Up to `limit` posts in the order Reddit ranks them. Faults propagate.
    pub async fn fetch_posts(&self, topic: &str, limit: usize) -> Result<Vec<SocialPost>, CoreError> {
        let oauth = self
            .oauth
            .as_ref()
            .ok_or(RedditApiError::MissingCredentials)?;

        let token = auth::fetch_app_token(&self.http_client, oauth).await?;
        let listing =
            api::search_posts(&self.http_client, &self.api_base, &token, topic, limit).await?;

        Ok(listing
            .data
            .children
            .into_iter()
            .take(limit)
            .map(|child| SocialPost::from(child.data))
            .collect())
    }
}

impl SocialSource for RedditClient {
    async fn search(&self, topic: &str, limit: usize) -> SocialFeed {
        match self.fetch_posts(topic, limit).await {
            Ok(posts) if posts.is_empty() => {
                info!("No live posts found for '{}'", topic);
                SocialFeed::Empty {
                    query: topic.to_string(),
                }
            }
            Ok(posts) => {
                info!("Found {} live posts for '{}'", posts.len(), topic);
                SocialFeed::Posts(posts)
            }
            Err(e) => {
                e.log_warn();
                warn!("Social search degraded to fault row for '{}'", topic);
                SocialFeed::Fault {
                    reason: e.to_string(),
                }
            }
        }
    }
}
