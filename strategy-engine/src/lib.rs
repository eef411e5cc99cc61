//! Aggregates trends, social buzz and content ideas for one topic.

pub mod calendar;

use llm_interface::{HuggingFaceProvider, IdeaGenerator};
use reddit_client::RedditClient;
use tracing::{debug, info};
use trends_client::GoogleTrendsClient;
use trendscope_core::{
    AppConfig, CoreError, ErrorExt, IdeaSource, SocialSource, StrategyReport, TrendSource,
    DEFAULT_POST_LIMIT, DEFAULT_REGION,
};

pub struct StrategyEngine<T, S, I> {
    trends: T,
    social: S,
    ideas: I,
    region: String,
    post_limit: usize,
}

/// The engine wired to the real services.
pub type LiveStrategyEngine =
    StrategyEngine<GoogleTrendsClient, RedditClient, IdeaGenerator<HuggingFaceProvider>>;

impl LiveStrategyEngine {
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let engine = StrategyEngine::new(
            GoogleTrendsClient::new(config)?,
            RedditClient::new(config)?,
            IdeaGenerator::from_config(config)?,
        )
        .with_region(&config.default_region)
        .with_post_limit(config.post_limit);

        info!(
            "Strategy engine ready (reddit configured: {}, idea generation configured: {})",
            engine.social.is_configured(),
            engine.ideas.is_configured()
        );
        Ok(engine)
    }
}

impl<T, S, I> StrategyEngine<T, S, I>
where
    T: TrendSource,
    S: SocialSource,
    I: IdeaSource,
{
    pub fn new(trends: T, social: S, ideas: I) -> Self {
        Self {
            trends,
            social,
            ideas,
            region: DEFAULT_REGION.to_string(),
            post_limit: DEFAULT_POST_LIMIT,
        }
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    pub fn with_post_limit(mut self, post_limit: usize) -> Self {
        self.post_limit = post_limit;
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// One full run. The three lookups are independent and run concurrently;
    /// a trends fault aborts the run and is returned unchanged.
    pub async fn run(&self, topic: &str, audience: &str) -> Result<StrategyReport, CoreError> {
        info!("Running strategy engine for '{}' / '{}'", topic, audience);

        let (trends, social, ideas) = tokio::join!(
            self.trends.fetch(topic, &self.region),
            self.social.search(topic, self.post_limit),
            self.ideas.generate(topic, audience),
        );

        let trends = trends.map_err(|e| {
            e.log_error();
            e
        })?;
        let calendar = calendar::generate(topic, audience);

        debug!(
            "Run complete: {} trend points, live posts: {}, generated ideas: {}",
            trends.points.len(),
            social.is_live(),
            ideas.is_generated()
        );

        Ok(StrategyReport {
            topic: topic.to_string(),
            audience: audience.to_string(),
            trends,
            social,
            ideas,
            calendar,
        })
    }
}
