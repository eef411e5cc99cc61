use iced::widget::{button, column, container, row, scrollable, text, text_input, Column};
use iced::{Command, Element, Font, Length, Theme};
use std::sync::Arc;
use strategy_engine::LiveStrategyEngine;
use trendscope_core::{
    ContentIdeas, ErrorExt, IdeaOrigin, SocialFeed, SocialPost, StrategyReport, TrendSeries,
};

pub const DEFAULT_TOPIC: &str = "movies";
pub const DEFAULT_AUDIENCE: &str = "Gen Z";

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone)]
pub enum Message {
    TopicChanged(String),
    AudienceChanged(String),
    RunRequested,
    RunFinished(Result<StrategyReport, String>),
}

pub struct App {
    engine: Arc<LiveStrategyEngine>,
    topic: String,
    audience: String,
    running: bool,
    report: Option<StrategyReport>,
    error: Option<String>,
}

impl App {
    pub fn new(engine: Arc<LiveStrategyEngine>) -> Self {
        Self {
            engine,
            topic: DEFAULT_TOPIC.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            running: false,
            report: None,
            error: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn report(&self) -> Option<&StrategyReport> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::TopicChanged(topic) => {
                self.topic = topic;
                Command::none()
            }
            Message::AudienceChanged(audience) => {
                self.audience = audience;
                Command::none()
            }
            Message::RunRequested => {
                if self.running {
                    return Command::none();
                }
                if self.topic.trim().is_empty() {
                    self.error = Some("Enter a topic first.".to_string());
                    return Command::none();
                }

                tracing::info!("Run requested for '{}'", self.topic);
                self.running = true;
                self.error = None;

                let engine = Arc::clone(&self.engine);
                let topic = self.topic.clone();
                let audience = self.audience.clone();
                Command::perform(
                    async move {
                        engine
                            .run(&topic, &audience)
                            .await
                            .map_err(|e| e.user_friendly_message())
                    },
                    Message::RunFinished,
                )
            }
            Message::RunFinished(result) => {
                self.running = false;
                match result {
                    Ok(report) => {
                        self.report = Some(report);
                        self.error = None;
                    }
                    Err(message) => {
                        tracing::error!("Run failed: {}", message);
                        self.report = None;
                        self.error = Some(message);
                    }
                }
                Command::none()
            }
        }
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let title: Element<Message, Theme> = text("AI Content Strategy Engine").size(24).into();

        let run_button = button(if self.running {
            "Running..."
        } else {
            "Run Strategy Engine"
        })
        .on_press_maybe((!self.running).then_some(Message::RunRequested));

        let inputs: Element<Message, Theme> = column![
            text("Enter topic:").size(14),
            text_input("movies", &self.topic)
                .on_input(Message::TopicChanged)
                .on_submit(Message::RunRequested),
            text("Enter target audience:").size(14),
            text_input("Gen Z", &self.audience).on_input(Message::AudienceChanged),
            run_button,
        ]
        .spacing(8)
        .into();

        let mut body = Column::new().spacing(20).push(title).push(inputs);

        if let Some(error) = &self.error {
            body = body.push(text(format!("Error: {}", error)).size(16));
        }

        if let Some(report) = &self.report {
            body = body
                .push(section("Google Trends", trends_view(&report.trends)))
                .push(section("Reddit Buzz", social_view(&report.social)))
                .push(section("AI Content Ideas", ideas_view(&report.ideas)))
                .push(section(
                    "AI 30-Day Calendar",
                    text(&report.calendar).font(Font::MONOSPACE).into(),
                ));
        }

        container(scrollable(container(body).padding(20)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn section<'a>(heading: &str, content: Element<'a, Message, Theme>) -> Element<'a, Message, Theme> {
    column![text(heading.to_string()).size(20), content]
        .spacing(8)
        .into()
}

fn trends_view(series: &TrendSeries) -> Element<'static, Message, Theme> {
    if series.is_empty() {
        return text(format!("No trend data for '{}'.", series.keyword))
            .size(14)
            .into();
    }

    let mut lines = Column::new()
        .spacing(4)
        .push(text(sparkline(series)).font(Font::MONOSPACE).size(18));
    if let Some(summary) = trend_summary(series) {
        lines = lines.push(text(summary).size(14));
    }
    lines.into()
}

fn social_view(feed: &SocialFeed) -> Element<'static, Message, Theme> {
    feed.display_rows()
        .iter()
        .fold(Column::new().spacing(4), |col, post| {
            col.push(text(post_row(post)).size(14))
        })
        .into()
}

fn ideas_view(ideas: &ContentIdeas) -> Element<'static, Message, Theme> {
    let mut col = ideas
        .ideas
        .iter()
        .enumerate()
        .fold(Column::new().spacing(4), |col, (i, idea)| {
            col.push(text(format!("{}. {}", i + 1, idea)).size(14))
        });
    if let IdeaOrigin::Template { .. } = ideas.origin {
        col = col.push(row![text("(template suggestions)").size(12)]);
    }
    col.into()
}

/// One block glyph per sample, scaled against the series peak.
pub fn sparkline(series: &TrendSeries) -> String {
    let peak = series.peak().map(|p| p.value).unwrap_or(0);
    if peak == 0 {
        return SPARK_LEVELS[0].to_string().repeat(series.points.len());
    }
    let top = SPARK_LEVELS.len() - 1;
    series
        .points
        .iter()
        .map(|p| SPARK_LEVELS[(p.value as usize * top) / peak as usize])
        .collect()
}

pub fn trend_summary(series: &TrendSeries) -> Option<String> {
    let peak = series.peak()?;
    let latest = series.latest()?;
    Some(format!(
        "Peak {} on {}, latest {}{}",
        peak.value,
        peak.timestamp.format("%Y-%m-%d"),
        latest.value,
        if latest.is_partial { " (partial)" } else { "" }
    ))
}

pub fn post_row(post: &SocialPost) -> String {
    if post.url.is_empty() {
        format!("- {} — Score: {}", post.title, post.score)
    } else {
        format!("- {} ({}) — Score: {}", post.title, post.url, post.score)
    }
}
