// CLI module - command-line argument parsing and handlers
//
// Top-level options select what the TUI shows (demo month, event fixture
// file, theme override). The `config` subcommand manages the config file:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR
// - config --update KEY=VALUE: Set one config value
// - config --path: Show config file path

use crate::config::{Config, LogRotation, VERSION};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// Almanac - month calendar for the terminal
#[derive(Parser)]
#[command(name = "almanac")]
#[command(version = VERSION)]
#[command(about = "Month calendar for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load events from a JSON fixture file
    #[arg(long, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Fill the current month with generated sample events
    #[arg(long)]
    pub demo: bool,

    /// Override the configured theme for this run
    #[arg(long)]
    pub theme: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Set one config value, e.g. --update theme=nord
        #[arg(long, value_name = "KEY=VALUE")]
        update: Option<String>,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    /// Handle subcommands. Returns true if one was handled (exit after).
    pub fn handle_command(&self) -> bool {
        match &self.command {
            Some(Commands::Config {
                show,
                reset,
                edit,
                update,
                path,
            }) => {
                if *path {
                    handle_config_path();
                } else if *show {
                    handle_config_show();
                } else if *reset {
                    handle_config_reset();
                } else if *edit {
                    handle_config_edit();
                } else if let Some(pair) = update {
                    handle_config_update(pair);
                } else {
                    // No flag provided, show usage
                    println!("Usage: almanac config [--show|--reset|--edit|--update KEY=VALUE|--path]");
                    println!();
                    println!("Options:");
                    println!("  --show              Display effective configuration");
                    println!("  --reset             Reset config file to defaults");
                    println!("  --edit              Open config file in $EDITOR");
                    println!("  --update KEY=VALUE  Set one config value");
                    println!("  --path              Show config file path");
                }
                true
            }
            None => false,
        }
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("theme = {:?}", config.theme);
    println!("use_theme_background = {}", config.use_theme_background);
    println!("week_start = {:?}", config.week_start.to_string());
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush().unwrap();

        let mut input = String::new();
        std::io::stdin().read_line(&mut input).unwrap();

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_update(pair: &str) {
    let Some((key, value)) = pair.split_once('=') else {
        eprintln!("Error: expected KEY=VALUE, got '{}'", pair);
        std::process::exit(1);
    };

    // Start from the file contents, not the effective config, so env-var
    // overrides are not baked into the file.
    let mut config = Config::from_file().unwrap_or_default();
    if let Err(message) = apply_update(&mut config, key.trim(), value.trim()) {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }

    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }
    if let Err(e) = std::fs::write(&path, config.to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Set {} = {}", key.trim(), value.trim());
}

/// Apply one KEY=VALUE update to a config. Keys use the TOML paths shown
/// by `config --show`.
fn apply_update(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    fn parse_bool(value: &str) -> Result<bool, String> {
        match value {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(format!("expected true/false, got '{}'", other)),
        }
    }

    match key {
        "theme" => config.theme = value.to_string(),
        "use_theme_background" => config.use_theme_background = parse_bool(value)?,
        "week_start" => match value.to_lowercase().as_str() {
            "sunday" | "sun" => config.week_start = chrono::Weekday::Sun,
            "monday" | "mon" => config.week_start = chrono::Weekday::Mon,
            other => return Err(format!("unknown week_start '{}'", other)),
        },
        "logging.level" => config.logging.level = value.to_string(),
        "logging.file_enabled" => config.logging.file_enabled = parse_bool(value)?,
        "logging.file_dir" => config.logging.file_dir = PathBuf::from(value),
        "logging.file_prefix" => config.logging.file_prefix = value.to_string(),
        "logging.file_rotation" => match value.to_lowercase().as_str() {
            "hourly" => config.logging.file_rotation = LogRotation::Hourly,
            "daily" => config.logging.file_rotation = LogRotation::Daily,
            "never" => config.logging.file_rotation = LogRotation::Never,
            other => return Err(format!("unknown rotation '{}'", other)),
        },
        other => return Err(format!("unknown config key '{}'", other)),
    }
    Ok(())
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor).arg(&path).status();

    match status {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_sets_known_keys() {
        let mut config = Config::default();

        apply_update(&mut config, "theme", "nord").unwrap();
        assert_eq!(config.theme, "nord");

        apply_update(&mut config, "week_start", "monday").unwrap();
        assert_eq!(config.week_start, chrono::Weekday::Mon);

        apply_update(&mut config, "logging.file_enabled", "true").unwrap();
        assert!(config.logging.file_enabled);

        apply_update(&mut config, "logging.file_rotation", "never").unwrap();
        assert_eq!(config.logging.file_rotation, LogRotation::Never);
    }

    #[test]
    fn update_rejects_bad_input() {
        let mut config = Config::default();
        assert!(apply_update(&mut config, "no_such_key", "x").is_err());
        assert!(apply_update(&mut config, "week_start", "friday").is_err());
        assert!(apply_update(&mut config, "use_theme_background", "maybe").is_err());
    }
}
