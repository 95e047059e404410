use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use term_pad_config::AppConfig;
use term_pad_core::{Document, Editor};
use term_pad_tui::{CrosstermSurface, SyntaxMode};

/// Environment variable that overrides the log file location.
const LOG_ENV_VAR: &str = "TERM_PAD_LOG";

/// A small terminal text editor with undo and syntax highlighting.
#[derive(Parser, Debug)]
#[command(name = "term-pad", version, about)]
struct Cli {
    /// File to edit. Created empty if it does not exist.
    file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();
    tracing::info!("Starting term-pad");

    let config = AppConfig::load_or_create(&AppConfig::config_path());

    // The terminal must be usable before any editing state is built
    let surface = CrosstermSurface::new()?;
    let document = Document::open_with_config(&cli.file, &config)?;
    let mode = SyntaxMode::from_path(&cli.file);
    tracing::info!(mode = mode.name(), "highlight mode selected");

    let mut editor = Editor::new(document, surface, mode, config);
    editor.run()
}

/// Sends logs to a file, since stdout belongs to the editing surface.
/// Logging stays off if the file cannot be opened.
fn init_logging() {
    let path = log_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = File::options().create(true).append(true).open(&path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn log_path() -> PathBuf {
    if let Ok(path) = std::env::var(LOG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs::cache_dir()
        .map(|d| d.join("term-pad").join("term-pad.log"))
        .unwrap_or_else(|| PathBuf::from("term-pad.log"))
}
