//! Seams between the strategy engine and the services it aggregates.
//!
//! Each external collaborator sits behind one of these traits so the engine
//! can be driven by in-process fakes in tests.

use crate::{ContentIdeas, CoreError, SocialFeed, TrendSeries};

pub const DEFAULT_REGION: &str = "IN";
pub const DEFAULT_POST_LIMIT: usize = 5;

/// Search interest over time for a single keyword.
///
/// Faults are returned to the caller, never masked.
pub trait TrendSource {
    async fn fetch(&self, keyword: &str, region: &str) -> Result<TrendSeries, CoreError>;
}

/// Keyword search against a social platform. Cannot fail.
pub trait SocialSource {
    async fn search(&self, topic: &str, limit: usize) -> SocialFeed;
}

/// Content idea generation. Cannot fail; degrades to template content.
pub trait IdeaSource {
    async fn generate(&self, topic: &str, audience: &str) -> ContentIdeas;
}
