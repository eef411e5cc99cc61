use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sample of search interest, scaled 0-100 by the trends service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub value: u32,
    /// The trailing bucket is still filling up.
    pub is_partial: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub keyword: String,
    pub region: String,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn empty(keyword: &str, region: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            region: region.to_string(),
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn peak(&self) -> Option<&TrendPoint> {
        self.points.iter().max_by_key(|p| p.value)
    }

    pub fn latest(&self) -> Option<&TrendPoint> {
        self.points.last()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPost {
    pub title: String,
    pub score: i64,
    pub url: String,
}

impl SocialPost {
    fn sentinel(title: String) -> Self {
        Self {
            title,
            score: 0,
            url: String::new(),
        }
    }

    /// Sentinel rows carry no link back to a real post.
    pub fn is_sentinel(&self) -> bool {
        self.score == 0 && self.url.is_empty()
    }
}

/// Outcome of a social search. Never an error: faults are data here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SocialFeed {
    Posts(Vec<SocialPost>),
    Empty { query: String },
    Fault { reason: String },
}

impl SocialFeed {
    pub fn is_live(&self) -> bool {
        matches!(self, SocialFeed::Posts(_))
    }

    /// Rows for display. Empty and Fault collapse into a single sentinel row,
    /// so the result always holds at least one entry.
    pub fn display_rows(&self) -> Vec<SocialPost> {
        match self {
            SocialFeed::Posts(posts) if !posts.is_empty() => posts.clone(),
            SocialFeed::Posts(_) => vec![SocialPost::sentinel(
                "No live posts found".to_string(),
            )],
            SocialFeed::Empty { query } => vec![SocialPost::sentinel(format!(
                "No live posts found for '{}'",
                query
            ))],
            SocialFeed::Fault { reason } => vec![SocialPost::sentinel(format!(
                "Error fetching posts: {}",
                reason
            ))],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// No API key was configured for the generation service.
    Unconfigured,
    Fault(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdeaOrigin {
    Generated,
    Template { reason: FallbackReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentIdeas {
    pub ideas: Vec<String>,
    pub origin: IdeaOrigin,
}

impl ContentIdeas {
    pub fn is_generated(&self) -> bool {
        matches!(self.origin, IdeaOrigin::Generated)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ideas
    }
}

/// Everything one run of the strategy engine produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub topic: String,
    pub audience: String,
    pub trends: TrendSeries,
    pub social: SocialFeed,
    pub ideas: ContentIdeas,
    pub calendar: String,
}
