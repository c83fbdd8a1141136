//! Tool availability probing.
//!
//! Checks, without capturing anything, which of the platform's capture tools
//! resolve on PATH. Every tool is probed concurrently and the result only
//! materializes once all probes have finished.

use crate::types::Platform;
use futures::future::join_all;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Outcome of a PATH probe for the platform's capture tools.
#[derive(Debug, Clone, Serialize)]
pub struct ToolAvailability {
    pub platform: Platform,
    /// Tool names that resolved on PATH, in the platform's preference order.
    pub available: Vec<String>,
    /// Fixed number of tools checked for this platform.
    pub total: usize,
    pub has_tools: bool,
}

/// Probe the current platform's tools.
pub async fn available_tools() -> ToolAvailability {
    available_tools_for(Platform::current()).await
}

/// Probe a specific platform's tool list against the local PATH.
pub async fn available_tools_for(platform: Platform) -> ToolAvailability {
    let dirs = path_dirs();
    let names = platform.tool_names();

    let probes = names.iter().map(|name| {
        let dirs = dirs.clone();
        async move {
            if resolve_in(&dirs, name).await {
                Some(name.to_string())
            } else {
                None
            }
        }
    });

    let available: Vec<String> = join_all(probes).await.into_iter().flatten().collect();
    debug!(
        "{}/{} capture tools available on {}",
        available.len(),
        names.len(),
        platform
    );

    ToolAvailability {
        platform,
        has_tools: !available.is_empty(),
        total: names.len(),
        available,
    }
}

fn path_dirs() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Whether `name` resolves to an executable in any of `dirs`.
async fn resolve_in(dirs: &[PathBuf], name: &str) -> bool {
    for dir in dirs {
        for filename in executable_names(name) {
            let full = dir.join(&filename);
            if let Ok(meta) = tokio::fs::metadata(&full).await {
                if is_executable(&meta) {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(windows)]
fn executable_names(name: &str) -> Vec<String> {
    vec![
        format!("{name}.exe"),
        format!("{name}.cmd"),
        format!("{name}.bat"),
        name.to_string(),
    ]
}

#[cfg(not(windows))]
fn executable_names(name: &str) -> Vec<String> {
    vec![name.to_string()]
}

#[cfg(unix)]
fn is_executable(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.is_file() && meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(meta: &std::fs::Metadata) -> bool {
    meta.is_file()
}
