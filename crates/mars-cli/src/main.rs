use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mars_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "mars")]
#[command(author, version, about = "A terminal reader with a swipeable post deck")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of ~/.config/mars/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run {
        /// Content file (JSON with posts and archives)
        #[arg(long)]
        content: Option<PathBuf>,
        /// Link to open first
        #[arg(short = 'l', long, default_value = "/")]
        link: String,
    },
    /// List the posts in the content file
    List {
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// Show the links the viewpager swipes through
    Deck {
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// List available themes
    Themes,
    /// Write the default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let is_tui = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logging(&config, is_tui)?;

    let config = Arc::new(config);

    match cli.command {
        None => commands::run::run(config, None, "/".to_string()).await,
        Some(Commands::Run { content, link }) => commands::run::run(config, content, link).await,
        Some(Commands::List { content }) => {
            let path = content.unwrap_or_else(|| config.content_path());
            commands::list::run(&config, &path).await
        }
        Some(Commands::Deck { content }) => {
            let path = content.unwrap_or_else(|| config.content_path());
            commands::deck::run(&config, &path).await
        }
        Some(Commands::Themes) => commands::themes::run(&config),
        Some(Commands::InitConfig { force }) => commands::init_config::run(force),
    }
}

/// Log to stderr, or to a file while the TUI owns the terminal
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let data_dir = config.data_dir();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let log_path = config.log_path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_tui() {
        let cli = Cli::try_parse_from(["mars"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_run_arguments() {
        let cli = Cli::try_parse_from(["mars", "run", "--content", "site.json", "-l", "/p1/"]).unwrap();
        match cli.command {
            Some(Commands::Run { content, link }) => {
                assert_eq!(content, Some(PathBuf::from("site.json")));
                assert_eq!(link, "/p1/");
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["mars", "deck", "-c", "/tmp/mars.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/mars.toml")));
        assert!(matches!(cli.command, Some(Commands::Deck { content: None })));
    }
}
