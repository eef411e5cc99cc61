use trendscope_core::{
    ConfigError, CoreError, ErrorExt, ErrorReporter, LlmError, RedditApiError, TrendsError,
};

#[test]
fn test_error_codes() {
    let trends_error = CoreError::Trends(TrendsError::Throttled);
    assert_eq!(trends_error.error_code(), "TRENDS");

    let reddit_error = CoreError::RedditApi(RedditApiError::InvalidToken);
    assert_eq!(reddit_error.error_code(), "REDDIT_API");

    let llm_error = CoreError::Llm(LlmError::InvalidApiKey {
        provider: "huggingface".to_string(),
    });
    assert_eq!(llm_error.error_code(), "LLM");

    let config_error = CoreError::Config(ConfigError::InvalidValue {
        field: "post_limit".to_string(),
        value: "0".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");
}

#[test]
fn test_nested_error_codes() {
    assert_eq!(
        TrendsError::MissingTimeseriesWidget {
            keyword: "movies".to_string()
        }
        .error_code(),
        "TRENDS_NO_TIMESERIES"
    );
    assert_eq!(
        RedditApiError::MissingCredentials.error_code(),
        "REDDIT_MISSING_CREDENTIALS"
    );
    assert_eq!(
        LlmError::EmptyGeneration {
            provider: "huggingface".to_string()
        }
        .error_code(),
        "LLM_EMPTY_GENERATION"
    );
}

#[test]
fn test_from_conversions() {
    let error: CoreError = TrendsError::Rejected { status_code: 400 }.into();
    assert!(matches!(
        error,
        CoreError::Trends(TrendsError::Rejected { status_code: 400 })
    ));

    let error: CoreError = RedditApiError::RateLimitExceeded.into();
    assert!(matches!(error, CoreError::RedditApi(_)));
}

#[test]
fn test_user_friendly_messages() {
    let reddit_error = CoreError::RedditApi(RedditApiError::InvalidToken);
    let message = reddit_error.user_friendly_message();
    assert!(message.contains("authentication token is invalid"));

    let trends_error = CoreError::Trends(TrendsError::MissingTimeseriesWidget {
        keyword: "xyzzy123".to_string(),
    });
    assert!(trends_error.user_friendly_message().contains("xyzzy123"));

    let config_error = CoreError::Config(ConfigError::InvalidValue {
        field: "post_limit".to_string(),
        value: "0".to_string(),
    });
    assert!(config_error.user_friendly_message().contains("post_limit"));
}

#[test]
fn test_display_includes_source_details() {
    let error = CoreError::Trends(TrendsError::Rejected { status_code: 429 });
    assert_eq!(
        error.to_string(),
        "Trends API error: Trends request rejected with status 429"
    );
}

#[test]
fn test_error_reporter() {
    let reporter = ErrorReporter::new()
        .with_error_reporting(true)
        .with_warning_reporting(true);
    let error = CoreError::Trends(TrendsError::Throttled);

    // This test just ensures the methods don't panic
    reporter.report_error(&error);
    reporter.report_warning(&error);
}
