//! Wire format of the Google Trends web endpoints.
//!
//! Every response body starts with an anti-hijacking guard (`)]}'` or
//! `)]}',`) that has to be removed before the JSON can be parsed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trendscope_core::{CoreError, TrendPoint, TrendsError};

pub const TIMEFRAME: &str = "today 12-m";
pub const TIMESERIES_WIDGET_ID: &str = "TIMESERIES";

#[derive(Debug, Clone, Serialize)]
pub struct ExploreRequest {
    #[serde(rename = "comparisonItem")]
    pub comparison_item: Vec<ComparisonItem>,
    pub category: u32,
    pub property: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonItem {
    pub keyword: String,
    pub time: String,
    pub geo: String,
}

impl ExploreRequest {
    pub fn for_keyword(keyword: &str, region: &str) -> Self {
        Self {
            comparison_item: vec![ComparisonItem {
                keyword: keyword.to_string(),
                time: TIMEFRAME.to_string(),
                geo: region.to_string(),
            }],
            category: 0,
            property: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExploreResponse {
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Widget {
    pub id: String,
    #[serde(default)]
    pub token: Option<String>,
    /// Forwarded verbatim to the widget data endpoint.
    #[serde(default)]
    pub request: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultilineResponse {
    pub default: MultilineData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultilineData {
    #[serde(rename = "timelineData", default)]
    pub timeline_data: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEntry {
    pub time: String,
    #[serde(default)]
    pub value: Vec<u32>,
    #[serde(rename = "isPartial", default)]
    pub is_partial: bool,
}

/// Drop the guard prefix; the payload starts at the first `{`.
pub fn strip_guard(body: &str) -> Result<&str, CoreError> {
    body.find('{').map(|start| &body[start..]).ok_or_else(|| {
        CoreError::Trends(TrendsError::InvalidResponse {
            details: "response body holds no JSON object".to_string(),
        })
    })
}

pub fn parse_explore(body: &str) -> Result<ExploreResponse, CoreError> {
    serde_json::from_str(strip_guard(body)?).map_err(|e| {
        CoreError::Trends(TrendsError::InvalidResponse {
            details: format!("explore payload: {e}"),
        })
    })
}

pub fn parse_multiline(body: &str) -> Result<MultilineResponse, CoreError> {
    serde_json::from_str(strip_guard(body)?).map_err(|e| {
        CoreError::Trends(TrendsError::InvalidResponse {
            details: format!("timeline payload: {e}"),
        })
    })
}

impl TimelineEntry {
    pub fn to_point(&self) -> Result<TrendPoint, CoreError> {
        let seconds: i64 = self.time.parse().map_err(|_| {
            CoreError::Trends(TrendsError::InvalidResponse {
                details: format!("bad timestamp '{}'", self.time),
            })
        })?;
        let timestamp = DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(|| {
            CoreError::Trends(TrendsError::InvalidResponse {
                details: format!("timestamp out of range: {seconds}"),
            })
        })?;

        Ok(TrendPoint {
            timestamp,
            value: self.value.first().copied().unwrap_or_default(),
            is_partial: self.is_partial,
        })
    }
}
