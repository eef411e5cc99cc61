//! Integration tests for the Hugging Face backed `IdeaGenerator` using wiremock HTTP mocks.

use llm_interface::{fallback_ideas, HuggingFaceProvider, IdeaGenerator, TextGenerator};
use std::time::Duration;
use trendscope_core::{AppConfig, CoreError, FallbackReason, IdeaOrigin, IdeaSource, LlmError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/facebook/blenderbot-400M-distill";

fn configured(server: &MockServer) -> AppConfig {
    AppConfig {
        huggingface_key: Some("hf_test_key".to_string()),
        huggingface_api_url: format!("{}{}", server.uri(), MODEL_PATH),
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn configured_generator_uses_model_output() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("authorization", "Bearer hf_test_key"))
        .and(body_json(serde_json::json!({
            "inputs": "Write 3 creative and catchy blog titles about 'movies' for teens, relevant to current trends."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "generated_text": "Binge Smarter\nPlot Twists Explained. Popcorn Science." }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let generator = IdeaGenerator::from_config(&configured(&server)).unwrap();
    assert!(generator.is_configured());

    let ideas = generator.generate("movies", "teens").await;
    assert_eq!(ideas.origin, IdeaOrigin::Generated);
    assert_eq!(
        ideas.ideas,
        vec!["Binge Smarter", "Plot Twists Explained", "Popcorn Science"]
    );
}

#[tokio::test]
async fn unconfigured_generator_never_calls_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = AppConfig {
        huggingface_api_url: format!("{}{}", server.uri(), MODEL_PATH),
        ..AppConfig::default()
    };
    let generator = IdeaGenerator::from_config(&config).unwrap();
    let ideas = generator.generate("skincare", "Gen Z").await;

    assert_eq!(ideas.ideas, fallback_ideas("skincare", "Gen Z"));
    assert_eq!(
        ideas.origin,
        IdeaOrigin::Template {
            reason: FallbackReason::Unconfigured
        }
    );
}

#[tokio::test]
async fn non_200_and_malformed_bodies_fall_back() {
    for response in [
        ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": "Model is currently loading"
        })),
        ResponseTemplate::new(201).set_body_json(serde_json::json!([
            { "generated_text": "Created is not OK" }
        ])),
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "generated_text": "no list" })),
        ResponseTemplate::new(200).set_body_json(serde_json::json!([])),
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(response)
            .mount(&server)
            .await;

        let generator = IdeaGenerator::from_config(&configured(&server)).unwrap();
        let ideas = generator.generate("skincare", "Gen Z").await;

        assert_eq!(ideas.ideas, fallback_ideas("skincare", "Gen Z"));
        assert!(matches!(
            ideas.origin,
            IdeaOrigin::Template {
                reason: FallbackReason::Fault(_)
            }
        ));
    }
}

#[tokio::test]
async fn slow_model_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "generated_text": "Too late." }]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = AppConfig {
        idea_timeout_secs: 1,
        ..configured(&server)
    };
    let provider = HuggingFaceProvider::from_config(&config).unwrap().unwrap();
    let err = provider.generate_text("prompt").await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Llm(LlmError::RequestTimeout { .. })
    ));

    let generator = IdeaGenerator::with_generator(provider);
    let ideas = generator.generate("movies", "teens").await;
    assert!(!ideas.is_generated());
    assert_eq!(ideas.ideas.len(), 3);
}

#[tokio::test]
async fn unauthorized_key_is_reported_as_invalid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = HuggingFaceProvider::from_config(&configured(&server))
        .unwrap()
        .unwrap();
    let err = provider.generate_text("prompt").await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Llm(LlmError::InvalidApiKey { .. })
    ));
}
