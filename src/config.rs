//! Configuration for the calendar TUI
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/almanac/config.toml)
//! 3. Built-in defaults (lowest priority)

use chrono::Weekday;
use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log file rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is unset ("error".."trace")
    pub level: String,

    /// Write logs to rotating files in addition to the in-TUI buffer
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,

    /// Log file name prefix
    pub file_prefix: String,

    /// Rotation policy for log files
    pub file_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("almanac/logs"),
            file_prefix: "almanac".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "auto", "dracula", "nord", "gruvbox"
    pub theme: String,

    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,

    /// First day of the week: "sunday" or "monday"
    pub week_start: Weekday,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "auto".to_string(),
            use_theme_background: false,
            week_start: Weekday::Sun,
            logging: LoggingConfig::default(),
        }
    }
}

/// File representation - every field optional so partial configs work
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub theme: Option<String>,
    pub use_theme_background: Option<bool>,
    pub week_start: Option<String>,
    pub logging: Option<FileLogging>,
}

/// Logging section of the config file
#[derive(Debug, Default, Deserialize)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<PathBuf>,
    pub file_prefix: Option<String>,
    pub file_rotation: Option<LogRotation>,
}

fn parse_week_start(value: &str) -> Option<Weekday> {
    match value.to_lowercase().as_str() {
        "sunday" | "sun" => Some(Weekday::Sun),
        "monday" | "mon" => Some(Weekday::Mon),
        other => {
            tracing::warn!(week_start = other, "unknown week_start, keeping default");
            None
        }
    }
}

impl Config {
    /// Path to the config file, if a config directory exists
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("almanac/config.toml"))
    }

    /// Load config: file first, then environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::from_file().unwrap_or_default();

        if let Ok(theme) = std::env::var("ALMANAC_THEME") {
            config.theme = theme;
        }
        if let Ok(value) = std::env::var("ALMANAC_WEEK_START") {
            if let Some(day) = parse_week_start(&value) {
                config.week_start = day;
            }
        }
        if let Ok(value) = std::env::var("ALMANAC_LOG_LEVEL") {
            config.logging.level = value;
        }
        if let Ok(value) = std::env::var("ALMANAC_LOG_FILE") {
            config.logging.file_enabled = matches!(value.as_str(), "1" | "true" | "yes");
        }

        config
    }

    /// Load config from the config file, if present and parseable
    pub fn from_file() -> Option<Self> {
        let path = Self::config_path()?;
        let raw = std::fs::read_to_string(&path).ok()?;
        match toml::from_str::<FileConfig>(&raw) {
            Ok(file) => Some(Self::from_file_config(file)),
            Err(e) => {
                eprintln!("Warning: invalid config at {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge a parsed file over the defaults
    pub fn from_file_config(file: FileConfig) -> Self {
        let defaults = Self::default();
        let logging = file.logging.unwrap_or_default();
        Self {
            theme: file.theme.unwrap_or(defaults.theme),
            use_theme_background: file
                .use_theme_background
                .unwrap_or(defaults.use_theme_background),
            week_start: file
                .week_start
                .as_deref()
                .and_then(parse_week_start)
                .unwrap_or(defaults.week_start),
            logging: LoggingConfig {
                level: logging.level.unwrap_or(defaults.logging.level),
                file_enabled: logging.file_enabled.unwrap_or(defaults.logging.file_enabled),
                file_dir: logging.file_dir.unwrap_or(defaults.logging.file_dir),
                file_prefix: logging.file_prefix.unwrap_or(defaults.logging.file_prefix),
                file_rotation: logging
                    .file_rotation
                    .unwrap_or(defaults.logging.file_rotation),
            },
        }
    }

    /// Render this config as a commented TOML template
    pub fn to_toml(&self) -> String {
        let rotation = match self.logging.file_rotation {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        };
        let week_start = match self.week_start {
            Weekday::Mon => "monday",
            _ => "sunday",
        };
        format!(
            r#"# Almanac configuration
# Generated by almanac v{version}

# Theme: "auto", "dracula", "nord", "gruvbox"
theme = "{theme}"

# Paint the theme's background color (false keeps the terminal's own)
use_theme_background = {use_bg}

# First day of the week: "sunday" or "monday"
week_start = "{week_start}"

[logging]
# Default level when RUST_LOG is unset: "error", "warn", "info", "debug", "trace"
level = "{level}"
# Also write logs to rotating files
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
# Rotation: "hourly", "daily", "never"
file_rotation = "{rotation}"
"#,
            version = VERSION,
            theme = self.theme,
            use_bg = self.use_theme_background,
            week_start = week_start,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
            rotation = rotation,
        )
    }

    /// Write the default config template if no config file exists yet
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let _ = std::fs::write(&path, Config::default().to_toml());
    }
}
