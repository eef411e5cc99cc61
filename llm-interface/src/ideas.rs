//! Content idea generation with a deterministic template fallback.

use crate::{HuggingFaceProvider, TextGenerator};
use tracing::{debug, warn};
use trendscope_core::{
    AppConfig, ContentIdeas, CoreError, ErrorExt, FallbackReason, IdeaOrigin, IdeaSource,
    LlmError,
};

pub const MAX_IDEAS: usize = 3;

pub fn build_prompt(topic: &str, audience: &str) -> String {
    format!(
        "Write 3 creative and catchy blog titles about '{}' for {}, relevant to current trends.",
        topic, audience
    )
}

pub fn fallback_ideas(topic: &str, audience: &str) -> Vec<String> {
    vec![
        format!("Top 5 {} hacks {} swears by", topic, audience),
        format!("Myth-busting {} routine for {}", topic, audience),
        format!("30-day challenge: Smarter {} tips", topic),
    ]
}

/// Newlines count as sentence breaks; at most [`MAX_IDEAS`] non-empty titles.
pub fn split_titles(text: &str) -> Vec<String> {
    text.replace('\n', ". ")
        .split('.')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .take(MAX_IDEAS)
        .map(str::to_string)
        .collect()
}

/// Either talks to a text generator or, when none is configured, goes
/// straight to the template.
pub struct IdeaGenerator<G> {
    generator: Option<G>,
}

impl IdeaGenerator<HuggingFaceProvider> {
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        Ok(Self {
            generator: HuggingFaceProvider::from_config(config)?,
        })
    }
}

impl<G: TextGenerator> IdeaGenerator<G> {
    pub fn unconfigured() -> Self {
        Self { generator: None }
    }

    pub fn with_generator(generator: G) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    async fn generated_titles(
        &self,
        generator: &G,
        topic: &str,
        audience: &str,
    ) -> Result<Vec<String>, CoreError> {
        let text = generator
            .generate_text(&build_prompt(topic, audience))
            .await?;
        let titles = split_titles(&text);
        if titles.is_empty() {
            return Err(LlmError::EmptyGeneration {
                provider: "huggingface".to_string(),
            }
            .into());
        }
        Ok(titles)
    }
}

impl<G: TextGenerator> IdeaSource for IdeaGenerator<G> {
    async fn generate(&self, topic: &str, audience: &str) -> ContentIdeas {
        let Some(generator) = &self.generator else {
            debug!("No generation key configured, using idea template");
            return ContentIdeas {
                ideas: fallback_ideas(topic, audience),
                origin: IdeaOrigin::Template {
                    reason: FallbackReason::Unconfigured,
                },
            };
        };

        match self.generated_titles(generator, topic, audience).await {
            Ok(ideas) => ContentIdeas {
                ideas,
                origin: IdeaOrigin::Generated,
            },
            Err(e) => {
                e.log_warn();
                warn!("Idea generation fell back to template for '{}'", topic);
                ContentIdeas {
                    ideas: fallback_ideas(topic, audience),
                    origin: IdeaOrigin::Template {
                        reason: FallbackReason::Fault(e.to_string()),
                    },
                }
            }
        }
    }
}
