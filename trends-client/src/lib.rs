pub mod api;

use api::{ExploreRequest, TIMESERIES_WIDGET_ID};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, warn};
use trendscope_core::{AppConfig, CoreError, TrendSeries, TrendSource, TrendsError};

const HOST_LANGUAGE: &str = "en-US";
const TZ_OFFSET_MINUTES: &str = "360";

/// Interest-over-time lookups against Google Trends.
#[derive(Debug, Clone)]
pub struct GoogleTrendsClient {
    http_client: Client,
    base_url: String,
}

impl GoogleTrendsClient {
    pub fn new(config: &AppConfig) -> Result<Self, CoreError> {
        // The explore endpoint answers 429 to clients that never picked up
        // the NID cookie from the landing page.
        let http_client = Client::builder().cookie_store(true).build()?;

        Ok(Self {
            http_client,
            base_url: config.trends_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn interest_over_time(
        &self,
        keyword: &str,
        region: &str,
    ) -> Result<TrendSeries, CoreError> {
        self.warm_up_cookies(region).await;

        let explore_req = serde_json::to_string(&ExploreRequest::for_keyword(keyword, region))?;
        info!("Requesting trends explore for '{}' in {}", keyword, region);
        let response = self
            .http_client
            .get(format!("{}/trends/api/explore", self.base_url))
            .query(&[
                ("hl", HOST_LANGUAGE),
                ("tz", TZ_OFFSET_MINUTES),
                ("req", explore_req.as_str()),
            ])
            .send()
            .await?;
        let body = Self::checked_body(response).await?;
        let explore = api::parse_explore(&body)?;

        let widget = explore
            .widgets
            .into_iter()
            .find(|w| w.id == TIMESERIES_WIDGET_ID)
            .ok_or_else(|| TrendsError::MissingTimeseriesWidget {
                keyword: keyword.to_string(),
            })?;
        let token = widget.token.ok_or_else(|| TrendsError::InvalidResponse {
            details: "TIMESERIES widget has no token".to_string(),
        })?;
        let widget_req = serde_json::to_string(&widget.request)?;

        info!("Requesting interest over time for '{}'", keyword);
        let response = self
            .http_client
            .get(format!("{}/trends/api/widgetdata/multiline", self.base_url))
            .query(&[
                ("hl", HOST_LANGUAGE),
                ("tz", TZ_OFFSET_MINUTES),
                ("req", widget_req.as_str()),
                ("token", token.as_str()),
            ])
            .send()
            .await?;
        let body = Self::checked_body(response).await?;
        let timeline = api::parse_multiline(&body)?;

        let points = timeline
            .default
            .timeline_data
            .iter()
            .map(|entry| entry.to_point())
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Retrieved {} trend points for '{}'", points.len(), keyword);
        Ok(TrendSeries {
            keyword: keyword.to_string(),
            region: region.to_string(),
            points,
        })
    }

    async fn warm_up_cookies(&self, region: &str) {
        let result = self
            .http_client
            .get(format!("{}/", self.base_url))
            .query(&[("geo", region)])
            .send()
            .await;
        if let Err(e) = result {
            debug!("Trends cookie warm-up failed: {}", e);
        }
    }

    async fn checked_body(response: Response) -> Result<String, CoreError> {
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Trends service throttled the request");
            return Err(TrendsError::Throttled.into());
        }
        if !status.is_success() {
            warn!("Trends request failed with status {}", status);
            return Err(TrendsError::Rejected {
                status_code: status.as_u16(),
            }
            .into());
        }
        Ok(response.text().await?)
    }
}

impl TrendSource for GoogleTrendsClient {
    async fn fetch(&self, keyword: &str, region: &str) -> Result<TrendSeries, CoreError> {
        self.interest_over_time(keyword, region).await
    }
}
