//! Shellshot CLI entry point.

use clap::Parser;
use shellshot::{take_screenshot, CaptureError, CaptureOptions, Config, ImageFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Parser)]
#[command(
    name = "shellshot",
    about = "Capture desktop screenshots via native command-line tools",
    disable_version_flag = true
)]
struct Cli {
    /// Base name for the output file (no extension)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Destination directory (a leading ~/ expands to the home directory)
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Image format: png, jpg, jpeg, bmp or webp
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Quality for lossy formats (1-100)
    #[arg(short = 'q', long)]
    quality: Option<u8>,

    /// Print step-by-step diagnostics and the full result as JSON
    #[arg(long)]
    verbose: bool,

    /// Print version information
    #[arg(short = 'v', long)]
    version: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("shellshot {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let _ = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .try_init();

    let config = Config::load();

    let format_name = cli
        .format
        .unwrap_or_else(|| config.capture.format.clone());
    let format = match format_name.parse::<ImageFormat>() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{RED}✗ {e}{RESET}");
            std::process::exit(1);
        }
    };

    let options = CaptureOptions {
        silent: false,
        verbose: cli.verbose,
        format,
        quality: cli.quality.unwrap_or(config.capture.quality),
        return_encoded_data: false,
        create_dir: true,
        timeout_secs: config.capture.timeout_secs,
    };

    let raw_output = cli
        .output
        .or_else(|| config.capture.output_dir.clone())
        .unwrap_or_else(|| ".".to_string());
    let output_dir = expand_home(&raw_output);

    match take_screenshot(&output_dir, cli.name.as_deref(), &options).await {
        Ok(shot) => {
            if shot.effective_format != shot.requested_format {
                println!(
                    "note: {} cannot encode {}, saved as {}",
                    shot.tool, shot.requested_format, shot.effective_format
                );
            }
            if cli.verbose {
                match serde_json::to_string_pretty(&shot) {
                    Ok(json) => println!("{json}"),
                    Err(_) => println!("{shot:#?}"),
                }
            } else {
                println!("{GREEN}✓{RESET} Saved {}", shot.path.display());
            }
        }
        Err(err) => {
            eprintln!("{RED}✗ {err}{RESET}");
            if cli.verbose {
                if let CaptureError::NoToolAvailable { suggestions, .. } = &err {
                    for hint in suggestions {
                        eprintln!("  hint: {hint}");
                    }
                }
            }
            std::process::exit(1);
        }
    }
}

/// Expand a leading `~`/`~/` to the user's home directory.
fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}
