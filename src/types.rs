//! Core types used throughout the crate.
//!
//! This module defines the platform identity, the supported image formats,
//! the structured capture result and the error taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Host platform, resolved once per capture from the compile target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOs,
    /// Linux and other Unix-likes.
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Unix => "unix",
        }
    }

    /// Fixed set of capture tools this crate knows how to drive on the
    /// platform. Order matches the fallback preference of the command table.
    pub fn tool_names(&self) -> &'static [&'static str] {
        match self {
            Platform::Windows => &["powershell", "nircmd", "import"],
            Platform::MacOs => &["screencapture"],
            Platform::Unix => &[
                "grim",
                "gnome-screenshot",
                "spectacle",
                "scrot",
                "maim",
                "import",
            ],
        }
    }

    /// Static remediation hints shown when every candidate tool failed.
    pub fn suggestions(&self) -> Vec<String> {
        let hints: &[&str] = match self {
            Platform::Windows => &[
                "PowerShell ships with Windows; make sure powershell.exe is on PATH",
                "Install NirCmd for a lightweight alternative capture tool",
            ],
            Platform::MacOs => &[
                "screencapture ships with macOS; grant Screen Recording permission in System Settings > Privacy & Security",
                "Run the capture once from Terminal to trigger the permission prompt",
            ],
            Platform::Unix => &[
                "On Wayland, install grim (requires a wlroots-compatible compositor)",
                "On X11, install scrot, maim or ImageMagick (import)",
                "Desktop environments usually ship gnome-screenshot or spectacle",
            ],
        };
        hints.iter().map(|s| s.to_string()).collect()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image formats the capture request may ask for.
///
/// `Jpeg` is kept distinct from `Jpg` as a label, but both write a `.jpg`
/// extension and map to the `image/jpeg` MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpg,
    Jpeg,
    Bmp,
    WebP,
}

/// Format names accepted by [`ImageFormat::from_str`].
pub const SUPPORTED_FORMATS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "webp"];

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::WebP => "webp",
        }
    }

    /// File extension written to disk. `jpeg` collapses to `jpg`.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg | ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::WebP => "webp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpg | ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Whether the quality option applies to this format.
    pub fn is_lossy(&self) -> bool {
        matches!(self, ImageFormat::Jpg | ImageFormat::Jpeg | ImageFormat::WebP)
    }
}

impl FromStr for ImageFormat {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" => Ok(ImageFormat::Jpg),
            "jpeg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            "webp" => Ok(ImageFormat::WebP),
            other => Err(CaptureError::UnsupportedFormat {
                requested: other.to_string(),
                supported: SUPPORTED_FORMATS.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base64 rendition of a captured image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Raw base64 string (standard alphabet, padded).
    pub base64: String,
    /// `data:<mime>;base64,<payload>` inline representation.
    pub data_url: String,
}

/// Structured result of a successful capture.
///
/// Constructed once the winning tool's output file is confirmed on disk and
/// never mutated afterwards, apart from the optional `encoded` attachment.
#[derive(Debug, Clone, Serialize)]
pub struct Screenshot {
    pub filename: String,
    pub path: PathBuf,
    pub absolute_path: PathBuf,
    pub directory: PathBuf,
    pub size_bytes: u64,
    pub size_kb: f64,
    pub size_mb: f64,
    /// Name of the external tool that produced the file.
    pub tool: String,
    pub platform: Platform,
    pub requested_format: ImageFormat,
    /// Format actually written. Differs from `requested_format` when the
    /// winning tool cannot encode the requested one (e.g. webp on Windows).
    pub effective_format: ImageFormat,
    pub timestamp: DateTime<Utc>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    /// Unix permission bits, when the platform exposes them.
    pub permissions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<EncodedImage>,
}

/// Capture failures surfaced to callers.
///
/// Per-tool execution errors are never surfaced individually; they fold into
/// the aggregate `NoToolAvailable` once the whole candidate list is spent.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("unsupported format '{requested}' (expected one of: {})", .supported.join(", "))]
    UnsupportedFormat {
        requested: String,
        supported: Vec<String>,
    },

    #[error("no screenshot tool produced an image on {platform} (tried: {})", .attempted.join(", "))]
    NoToolAvailable {
        platform: Platform,
        attempted: Vec<String>,
        suggestions: Vec<String>,
        timestamp: DateTime<Utc>,
    },

    #[error("destination directory does not exist: {}", .0.display())]
    DirectoryUnavailable(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    /// Aggregate error for an exhausted candidate list.
    pub fn no_tool_available(platform: Platform, attempted: Vec<String>) -> Self {
        CaptureError::NoToolAvailable {
            platform,
            suggestions: platform.suggestions(),
            attempted,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_case_insensitive() {
        assert_eq!("JPG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpg);
        assert_eq!("Png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("WEBP".parse::<ImageFormat>().unwrap(), ImageFormat::WebP);
    }

    #[test]
    fn test_format_jpeg_is_jpg_on_disk() {
        let jpeg = "jpeg".parse::<ImageFormat>().unwrap();
        assert_eq!(jpeg, ImageFormat::Jpeg);
        assert_eq!(jpeg.extension(), "jpg");
        assert_eq!(jpeg.as_str(), "jpeg");
        assert_eq!(jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_format_mixed_case_normalizes_for_mime() {
        let fmt = "JPG".parse::<ImageFormat>().unwrap();
        assert_eq!(fmt.extension(), "jpg");
        assert_eq!(fmt.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let err = "tiff".parse::<ImageFormat>().unwrap_err();
        match err {
            CaptureError::UnsupportedFormat { requested, supported } => {
                assert_eq!(requested, "tiff");
                assert_eq!(supported.len(), SUPPORTED_FORMATS.len());
            }
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_platform_tool_counts() {
        assert_eq!(Platform::Windows.tool_names().len(), 3);
        assert_eq!(Platform::MacOs.tool_names().len(), 1);
        assert_eq!(Platform::Unix.tool_names().len(), 6);
    }

    #[test]
    fn test_platform_suggestions_nonempty() {
        for platform in [Platform::Windows, Platform::MacOs, Platform::Unix] {
            assert!(!platform.suggestions().is_empty());
        }
    }

    #[test]
    fn test_no_tool_available_carries_suggestions() {
        let err = CaptureError::no_tool_available(Platform::Unix, vec!["grim".into()]);
        match err {
            CaptureError::NoToolAvailable { platform, attempted, suggestions, .. } => {
                assert_eq!(platform, Platform::Unix);
                assert_eq!(attempted, vec!["grim".to_string()]);
                assert_eq!(suggestions, Platform::Unix.suggestions());
            }
            other => panic!("expected NoToolAvailable, got {other:?}"),
        }
    }
}
