//! Capture orchestration.
//!
//! Resolves the platform and destination, builds the ranked command table,
//! drives the fallback cascade and assembles the structured result from the
//! winning tool's output file.

use crate::candidates::build_candidates;
use crate::cascade::{run_cascade, CommandRunner, SystemCommandRunner};
use crate::config::CaptureOptions;
use crate::encode::encode_file;
use crate::types::{CaptureError, ImageFormat, Platform, Screenshot};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Capture the screen into `dir`, optionally under a custom base name
/// (extension is derived from the requested format).
pub async fn take_screenshot(
    dir: impl AsRef<Path>,
    name: Option<&str>,
    options: &CaptureOptions,
) -> Result<Screenshot, CaptureError> {
    take_screenshot_with(&SystemCommandRunner, dir.as_ref(), name, options).await
}

/// Convenience wrapper: capture into the current working directory with
/// console output suppressed.
pub async fn capture_screen(options: &CaptureOptions) -> Result<Screenshot, CaptureError> {
    let mut options = options.clone();
    options.silent = true;
    let dir = std::env::current_dir()?;
    take_screenshot(dir, None, &options).await
}

pub(crate) async fn take_screenshot_with(
    runner: &dyn CommandRunner,
    dir: &Path,
    name: Option<&str>,
    options: &CaptureOptions,
) -> Result<Screenshot, CaptureError> {
    let platform = Platform::current();
    debug!("Capturing on {} into {}", platform, dir.display());

    // Directory existence is a hard precondition; nothing is spawned until
    // it holds.
    ensure_directory(dir, options.create_dir).await?;

    let filename = match name {
        Some(base) => format!("{}.{}", base, options.format.extension()),
        None => default_filename(options.format),
    };
    let path = dir.join(&filename);

    let candidates = build_candidates(platform, options.format, options.quality, &path);
    let timeout = Duration::from_secs(options.timeout_secs);
    let winner = run_cascade(runner, platform, &candidates, timeout).await?;

    if winner.effective_format != options.format {
        warn!(
            "{} cannot encode {}, wrote {} instead",
            winner.tool, options.format, winner.effective_format
        );
    }

    let meta = tokio::fs::metadata(&winner.output_path).await?;
    let size_bytes = meta.len();
    let absolute_path = tokio::fs::canonicalize(&winner.output_path)
        .await
        .unwrap_or_else(|_| winner.output_path.clone());

    let mut shot = Screenshot {
        filename: winner
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.clone()),
        path: winner.output_path.clone(),
        absolute_path,
        directory: dir.to_path_buf(),
        size_bytes,
        size_kb: size_bytes as f64 / 1024.0,
        size_mb: size_bytes as f64 / (1024.0 * 1024.0),
        tool: winner.tool.to_string(),
        platform,
        requested_format: options.format,
        effective_format: winner.effective_format,
        timestamp: Utc::now(),
        created: meta.created().ok().map(DateTime::from),
        modified: meta.modified().ok().map(DateTime::from),
        permissions: file_mode(&meta),
        encoded: None,
    };

    if options.return_encoded_data {
        match encode_file(&winner.output_path, winner.effective_format).await {
            Ok(encoded) => shot.encoded = Some(encoded),
            // Non-fatal: the capture itself already succeeded.
            Err(e) => warn!("Failed to encode {}: {}", winner.output_path.display(), e),
        }
    }

    info!(
        "Screenshot saved to {} ({} bytes, via {})",
        shot.path.display(),
        shot.size_bytes,
        shot.tool
    );
    Ok(shot)
}

async fn ensure_directory(dir: &Path, create: bool) -> Result<(), CaptureError> {
    if let Ok(meta) = tokio::fs::metadata(dir).await {
        if meta.is_dir() {
            return Ok(());
        }
    }
    if !create {
        return Err(CaptureError::DirectoryUnavailable(dir.to_path_buf()));
    }
    tokio::fs::create_dir_all(dir).await?;
    debug!("Created destination directory {}", dir.display());
    Ok(())
}

fn default_filename(format: ImageFormat) -> String {
    format!(
        "screenshot_{}.{}",
        Utc::now().format("%Y-%m-%d_%H-%M-%S"),
        format.extension()
    )
}

#[cfg(unix)]
fn file_mode(meta: &std::fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(meta.permissions().mode())
}

#[cfg(not(unix))]
fn file_mode(_meta: &std::fs::Metadata) -> Option<u32> {
    None
}
