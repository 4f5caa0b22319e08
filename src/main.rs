// Entry point: CLI parsing, config, logging setup, then the TUI.

use almanac::cli::Cli;
use almanac::config::{Config, LogRotation};
use almanac::demo;
use almanac::events::{Event, EventStore};
use almanac::logging::{BufferLayer, LogBuffer};
use almanac::theme::Theme;
use almanac::tui::{app::App, run_tui};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.handle_command() {
        return Ok(());
    }

    Config::ensure_config_exists();
    let mut config = Config::from_env();
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }

    let log_buffer = LogBuffer::new();
    // Guard must outlive the TUI so buffered file writes flush on exit
    let _file_guard = init_logging(&config, log_buffer.clone());

    tracing::info!(version = almanac::config::VERSION, "almanac starting");

    let today = chrono::Local::now().date_naive();
    let store = load_events(&cli, today)?;

    let app = App::new(
        store,
        Theme::by_name(&config.theme),
        config.use_theme_background,
        config.week_start,
        log_buffer,
        today,
    );

    run_tui(app).await
}

/// Install the tracing subscriber: the in-memory buffer layer always, a
/// rolling file layer when enabled. Returns the appender guard, if any.
fn init_logging(
    config: &Config,
    buffer: LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("almanac={}", config.logging.level)));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(BufferLayer::new(buffer));

    if !config.logging.file_enabled {
        registry.init();
        return None;
    }

    let logging = &config.logging;
    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, format!("{}.log", logging.file_prefix))
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    registry
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
    Some(guard)
}

/// Build the event store from --events, --demo, or empty.
fn load_events(cli: &Cli, today: chrono::NaiveDate) -> Result<EventStore> {
    if let Some(path) = &cli.events {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read events file {}", path.display()))?;
        let events: Vec<Event> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid events JSON in {}", path.display()))?;
        tracing::info!(count = events.len(), "loaded events from file");
        return Ok(EventStore::from_events(events));
    }

    if cli.demo {
        return Ok(EventStore::from_events(demo::month_of_events(today)));
    }

    Ok(EventStore::new())
}
