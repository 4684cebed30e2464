//! Gridpad - a terminal text editor over a fixed grid of lines.
//!
//! # Usage
//!
//! ```bash
//! gridpad notes.txt
//! gridpad --max-lines 500 --line-capacity 120 notes.txt
//! gridpad --log-file gridpad.log
//! ```

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use gridpad::app::App;
use gridpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use gridpad::perf;

/// A terminal text editor over a fixed grid of lines
#[derive(Parser, Debug)]
#[command(name = "gridpad", version, about, long_about = None)]
struct Cli {
    /// Text file to edit (created on first save if missing)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Maximum number of lines in the buffer
    #[arg(long, value_name = "N")]
    max_lines: Option<usize>,

    /// Line capacity; lines hold at most N-1 characters
    #[arg(long, value_name = "N")]
    line_capacity: Option<usize>,

    /// Lines scrolled per mouse wheel notch
    #[arg(long, value_name = "N")]
    scroll_lines: Option<usize>,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log timing of startup, file I/O and frames
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Build the log filter from a `RUST_LOG` value.
///
/// `default_level` applies only when `rust_log` holds no directives. The
/// perf target is turned up to debug when timing is on.
fn log_filter(rust_log: &str, default_level: LevelFilter, perf: bool) -> Result<EnvFilter> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(rust_log);
    if perf {
        filter = filter.add_directive("gridpad::perf=debug".parse()?);
    }
    Ok(filter)
}

/// Install the global subscriber.
///
/// The terminal UI owns the screen, so stderr only gets errors by
/// default. A log file records info and above. A set `RUST_LOG` replaces
/// that default.
fn init_logging(log_file: Option<&Path>, perf: bool) -> Result<()> {
    let level = if log_file.is_some() {
        LevelFilter::INFO
    } else {
        LevelFilter::ERROR
    };
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let filter = log_filter(&rust_log, level, perf)?;

    if let Some(path) = log_file {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        max_lines: cli.max_lines,
        line_capacity: cli.line_capacity,
        scroll_lines: cli.scroll_lines,
        perf: cli.perf,
        log_file: cli.log_file.clone(),
    };

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref(), effective.perf)?;
    perf::set_enabled(effective.perf);
    tracing::debug!(?effective, "resolved flags");

    let limits = effective.limits()?;

    // Run the application
    let mut app = App::new(cli.file)
        .with_limits(limits)
        .with_scroll_lines(effective.scroll_lines())
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
