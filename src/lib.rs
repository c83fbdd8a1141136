//! Shellshot - desktop screenshot capture via native command-line tools
//!
//! This crate captures the screen by delegating to whichever external
//! capture program is available on the host, instead of linking against
//! platform graphics APIs:
//!
//! - **Windows**: a PowerShell/System.Drawing one-liner, then NirCmd
//! - **macOS**: the bundled `screencapture` utility
//! - **Linux/Unix**: `grim` on Wayland, then a cascade of X11-era tools
//!
//! # Architecture
//!
//! For every capture a ranked candidate list is built for the (platform,
//! format) pair and executed strictly in order; the first command that exits
//! cleanly and verifiably writes its output file wins. The ordering is the
//! quality ranking, so nothing after the first success is ever attempted.
//! Success is normalized into a [`Screenshot`], exhaustion of the list into
//! a [`CaptureError`] carrying the attempted tools and remediation hints.

pub mod candidates;
pub mod capture;
pub mod cascade;
pub mod config;
pub mod encode;
pub mod probe;
pub mod types;

// Re-export commonly used types
pub use candidates::{build_candidates, CandidateCommand};
pub use capture::{capture_screen, take_screenshot};
pub use cascade::{run_cascade, CommandRunner, RunStatus, SystemCommandRunner};
pub use config::{CaptureOptions, Config};
pub use encode::encode_file;
pub use probe::{available_tools, available_tools_for, ToolAvailability};
pub use types::{
    CaptureError, EncodedImage, ImageFormat, Platform, Screenshot, SUPPORTED_FORMATS,
};
