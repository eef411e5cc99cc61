//! App-only OAuth2 (client-credentials grant) against Reddit's token endpoint.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, ClientId, ClientSecret, HttpRequest, HttpResponse, TokenResponse, TokenUrl,
};
use reqwest::Client;
use tracing::{debug, info};
use trendscope_core::{CoreError, RedditApiError};

// Required by the oauth2 client even though the client-credentials grant
// never visits it.
const REDDIT_AUTHORIZE_URL: &str = "https://www.reddit.com/api/v1/authorize";

#[derive(Debug, Clone)]
pub struct RedditOAuth2Config {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
}

impl RedditOAuth2Config {
    pub fn new(client_id: String, client_secret: String, token_url: String) -> Self {
        Self {
            client_id,
            client_secret,
            token_url,
        }
    }

    fn oauth_client(&self) -> Result<BasicClient, CoreError> {
        let auth_url = AuthUrl::new(REDDIT_AUTHORIZE_URL.to_string()).map_err(|e| {
            RedditApiError::AuthenticationFailed {
                reason: format!("invalid authorize url: {e}"),
            }
        })?;
        let token_url = TokenUrl::new(self.token_url.clone()).map_err(|e| {
            RedditApiError::AuthenticationFailed {
                reason: format!("invalid token url '{}': {e}", self.token_url),
            }
        })?;

        Ok(BasicClient::new(
            ClientId::new(self.client_id.clone()),
            Some(ClientSecret::new(self.client_secret.clone())),
            auth_url,
            Some(token_url),
        ))
    }
}

/// Exchange the app's client id and secret for a bearer token.
pub async fn fetch_app_token(
    http_client: &Client,
    config: &RedditOAuth2Config,
) -> Result<String, CoreError> {
    let oauth_client = config.oauth_client()?;

    info!("Requesting app-only Reddit token");
    let token = oauth_client
        .exchange_client_credentials()
        .request_async(|request| send_token_request(http_client.clone(), request))
        .await
        .map_err(|e| RedditApiError::AuthenticationFailed {
            reason: e.to_string(),
        })?;

    debug!("Reddit token acquired");
    Ok(token.access_token().secret().clone())
}

/// Runs oauth2's token request through our reqwest client so Reddit sees the
/// configured User-Agent.
async fn send_token_request(
    http_client: Client,
    request: HttpRequest,
) -> Result<HttpResponse, reqwest::Error> {
    let response = http_client
        .request(request.method, request.url.as_str())
        .headers(request.headers)
        .body(request.body)
        .send()
        .await?;

    let status_code = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}
