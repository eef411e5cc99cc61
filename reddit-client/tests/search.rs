//! Integration tests for `RedditClient` using wiremock HTTP mocks.

use reddit_client::RedditClient;
use trendscope_core::{AppConfig, SocialFeed, SocialSource};
use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> RedditClient {
    let config = AppConfig {
        reddit_client_id: Some("test-id".to_string()),
        reddit_client_secret: Some("test-secret".to_string()),
        reddit_user_agent: "trendscope-tests/0.1".to_string(),
        reddit_auth_url: format!("{}/api/v1/access_token", server.uri()),
        reddit_api_base: server.uri(),
        ..AppConfig::default()
    };
    RedditClient::new(&config).expect("client construction should not fail")
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(header_exists("authorization"))
        .and(header("user-agent", "trendscope-tests/0.1"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "app-token",
            "token_type": "bearer",
            "expires_in": 86400,
            "scope": "*"
        })))
        .mount(server)
        .await;
}

fn listing(posts: &[(&str, i64, &str)]) -> serde_json::Value {
    let children: Vec<serde_json::Value> = posts
        .iter()
        .map(|(title, score, url)| {
            serde_json::json!({
                "kind": "t3",
                "data": { "title": title, "score": score, "url": url, "subreddit": "movies" }
            })
        })
        .collect();
    serde_json::json!({
        "kind": "Listing",
        "data": { "children": children, "after": null, "before": null, "dist": posts.len() }
    })
}

#[tokio::test]
async fn search_returns_posts_in_api_order() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/all/search"))
        .and(query_param("q", "movies"))
        .and(query_param("sort", "hot"))
        .and(query_param("limit", "5"))
        .and(header("authorization", "Bearer app-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[
            ("Low score first", 3, "https://example.com/1"),
            ("High score second", 900, "https://example.com/2"),
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let feed = client.search("movies", 5).await;

    let SocialFeed::Posts(posts) = &feed else {
        panic!("expected live posts, got {feed:?}");
    };
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Low score first");
    assert_eq!(posts[0].score, 3);
    assert_eq!(posts[1].title, "High score second");
    assert_eq!(posts[1].url, "https://example.com/2");
}

#[tokio::test]
async fn search_truncates_to_limit() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/all/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[
            ("a", 1, "https://example.com/a"),
            ("b", 2, "https://example.com/b"),
            ("c", 3, "https://example.com/c"),
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let posts = client.fetch_posts("anything", 2).await.expect("search should succeed");
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b"]);
}

#[tokio::test]
async fn zero_matches_is_empty_not_fault() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/all/search"))
        .and(query_param("q", "xyzzy123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let feed = client.search("xyzzy123", 5).await;

    assert_eq!(
        feed,
        SocialFeed::Empty {
            query: "xyzzy123".to_string()
        }
    );
    let rows = feed.display_rows();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].title.contains("No live posts found for 'xyzzy123'"));
    assert_eq!(rows[0].score, 0);
    assert_eq!(rows[0].url, "");
}

#[tokio::test]
async fn rejected_token_exchange_is_fault() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_client"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let feed = client.search("movies", 5).await;

    let SocialFeed::Fault { reason } = &feed else {
        panic!("expected fault, got {feed:?}");
    };
    assert!(reason.contains("Authentication failed"));
    assert!(feed.display_rows()[0].title.starts_with("Error fetching posts: "));
}

#[tokio::test]
async fn server_error_and_garbage_are_faults() {
    for response in [
        ResponseTemplate::new(503),
        ResponseTemplate::new(200).set_body_string("not json"),
        ResponseTemplate::new(429),
    ] {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/r/all/search"))
            .respond_with(response)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let feed = client.search("movies", 5).await;
        assert!(matches!(feed, SocialFeed::Fault { .. }), "got {feed:?}");
        assert_eq!(feed.display_rows().len(), 1);
    }
}

#[tokio::test]
async fn unreachable_service_never_panics() {
    let config = AppConfig {
        reddit_client_id: Some("test-id".to_string()),
        reddit_client_secret: Some("test-secret".to_string()),
        reddit_auth_url: "http://127.0.0.1:9/api/v1/access_token".to_string(),
        reddit_api_base: "http://127.0.0.1:9".to_string(),
        ..AppConfig::default()
    };
    let client = RedditClient::new(&config).unwrap();

    for topic in ["", "movies", "a b c", "ünïcödé"] {
        let feed = client.search(topic, 5).await;
        assert!(!feed.display_rows().is_empty());
        assert!(!feed.is_live());
    }
}
