use gui::App;
use iced::{Application, Settings};
use std::sync::Arc;
use strategy_engine::LiveStrategyEngine;
use tracing_subscriber::EnvFilter;
use trendscope_core::{AppConfig, CoreError, ErrorReporter};

const DEFAULT_LOG_FILTER: &str = "trendscope=debug,gui=debug,strategy_engine=debug";

fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    tracing::info!("Starting Trendscope - AI Content Strategy Engine");

    let reporter = ErrorReporter::new();
    let config = AppConfig::load().map_err(CoreError::from).map_err(|e| {
        reporter.report_error(&e);
        e
    })?;
    let engine = LiveStrategyEngine::from_config(&config).map_err(|e| {
        reporter.report_error(&e);
        e
    })?;

    let mut settings = Settings::with_flags(Arc::new(engine));
    settings.window = iced::window::Settings {
        size: iced::Size::new(1000.0, 800.0),
        min_size: Some(iced::Size::new(640.0, 480.0)),
        ..Default::default()
    };

    TrendscopeApp::run(settings).map_err(|e| {
        tracing::error!("Application error: {}", e);
        CoreError::Internal {
            message: format!("GUI error: {e}"),
        }
    })
}

struct TrendscopeApp {
    app: App,
}

impl Application for TrendscopeApp {
    type Message = gui::Message;
    type Theme = iced::Theme;
    type Executor = iced::executor::Default;
    type Flags = Arc<LiveStrategyEngine>;

    fn new(engine: Self::Flags) -> (Self, iced::Command<Self::Message>) {
        tracing::info!("Initializing application");
        (
            Self {
                app: App::new(engine),
            },
            iced::Command::none(),
        )
    }

    fn title(&self) -> String {
        "Trendscope - AI Content Strategy Engine".to_string()
    }

    fn update(&mut self, message: Self::Message) -> iced::Command<Self::Message> {
        self.app.update(message)
    }

    fn view(&self) -> iced::Element<Self::Message> {
        self.app.view()
    }
}
