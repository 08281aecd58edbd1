//! Living document viewer - Entry Point

use clap::Parser;
use livingdoc::config::KeyBindings;
use livingdoc::state::{AppState, LivingDocDelegate};
use livingdoc::view::{ColorConfig, ThemeName};
use livingdoc::view_state::render::EventRenderAdapter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Living document viewer - browse an article's revision history as a timeline
#[derive(Parser, Debug)]
#[command(name = "livingdoc")]
#[command(version)]
#[command(about = "TUI timeline of an article's recent changes, loaded page by page")]
pub struct Args {
    /// Path to the revision feed (JSON Lines, one page per line)
    pub file: PathBuf,

    /// Color theme: light, dark, sepia or black
    #[arg(long, value_parser = parse_theme)]
    pub theme: Option<ThemeName>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Delay before each requested page is delivered, in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_theme(raw: &str) -> Result<ThemeName, livingdoc::view::styles::UnknownTheme> {
    raw.parse()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = livingdoc::config::load_config_with_precedence(args.config.clone())?;
        let merged = livingdoc::config::merge_config(config_file);
        let with_env = livingdoc::config::apply_env_overrides(merged);
        livingdoc::config::apply_cli_overrides(with_env, args.theme, args.latency_ms)
    };

    // Flushes buffered log lines when dropped at the end of main
    let _log_guard = livingdoc::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let feed = livingdoc::source::load_feed(&args.file)?;
    let (source, pages) = livingdoc::source::FilePageSource::new(feed, config.fetch_latency());

    // The screen only holds a weak reference; this binding keeps the source alive.
    let delegate: Arc<dyn LivingDocDelegate> = source;
    let app_state = AppState::new(
        &delegate,
        EventRenderAdapter::with_default_cells(config.estimate_defaults()),
        config.theme,
        ColorConfig::from_env_and_args(args.no_color),
    )?;

    livingdoc::view::run_with_source(app_state, pages, KeyBindings::default())?;

    info!("Exiting");
    Ok(())
}
