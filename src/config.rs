//! Capture options and file-based configuration.
//!
//! `CaptureOptions` is the per-call configuration; every field is statically
//! typed and carries an explicit default, so an unrecognized format can never
//! sneak past construction. `Config` holds CLI defaults loaded from a TOML
//! file and falls back to built-in values when the file is absent or broken.

use crate::types::ImageFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Per-call capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Suppress console output in the CLI. Library code logs through
    /// `tracing` regardless; embedders control verbosity via their
    /// subscriber.
    #[serde(default)]
    pub silent: bool,

    /// Emit step-by-step diagnostics (CLI: DEBUG-level subscriber and a full
    /// JSON result dump).
    #[serde(default)]
    pub verbose: bool,

    /// Target image format.
    #[serde(default = "default_format")]
    pub format: ImageFormat,

    /// Quality 1-100, advisory, only meaningful for lossy formats.
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Attach base64/data-URL fields to the result.
    #[serde(default)]
    pub return_encoded_data: bool,

    /// Auto-create a missing destination directory. When disabled, a missing
    /// directory fails the capture before any tool runs.
    #[serde(default = "default_true")]
    pub create_dir: bool,

    /// Upper bound for a single candidate tool run. Expiry counts as a
    /// failed candidate and the cascade moves on.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            silent: false,
            verbose: false,
            format: default_format(),
            quality: default_quality(),
            return_encoded_data: false,
            create_dir: true,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// CLI defaults loaded from the user's config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub capture: CaptureDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureDefaults {
    /// Default destination directory when `-o` is not given.
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Default format name; validated when parsed into `ImageFormat`.
    #[serde(default = "default_format_name")]
    pub format: String,

    #[serde(default = "default_quality")]
    pub quality: u8,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CaptureDefaults {
    fn default() -> Self {
        Self {
            output_dir: None,
            format: default_format_name(),
            quality: default_quality(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_format() -> ImageFormat {
    ImageFormat::Png
}

fn default_format_name() -> String {
    "png".to_string()
}

fn default_quality() -> u8 {
    90
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Self::default_config_path())
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Self {
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {}, using defaults", path, e);
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    /// Default config file location (`~/.config/shellshot/config.toml`).
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shellshot")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let opts = CaptureOptions::default();
        assert!(!opts.silent);
        assert!(!opts.verbose);
        assert_eq!(opts.format, ImageFormat::Png);
        assert_eq!(opts.quality, 90);
        assert!(!opts.return_encoded_data);
        assert!(opts.create_dir);
        assert_eq!(opts.timeout_secs, 30);
    }

    #[test]
    fn test_options_deserialize_rejects_unknown_format() {
        let err = serde_json::from_str::<CaptureOptions>(r#"{"format":"tiff"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_options_deserialize_partial() {
        let opts: CaptureOptions =
            serde_json::from_str(r#"{"format":"webp","quality":50}"#).unwrap();
        assert_eq!(opts.format, ImageFormat::WebP);
        assert_eq!(opts.quality, 50);
        assert!(opts.create_dir);
    }

    #[test]
    fn test_config_missing_file_falls_back() {
        let config = Config::load_from_path(PathBuf::from("/nonexistent/config.toml"));
        assert_eq!(config.capture.format, "png");
        assert_eq!(config.capture.quality, 90);
    }

    #[test]
    fn test_config_parses_toml() {
        let config: Config = toml::from_str(
            r#"
            [capture]
            output_dir = "~/Pictures"
            format = "jpg"
            quality = 75
            "#,
        )
        .unwrap();
        assert_eq!(config.capture.output_dir.as_deref(), Some("~/Pictures"));
        assert_eq!(config.capture.format, "jpg");
        assert_eq!(config.capture.quality, 75);
        assert_eq!(config.capture.timeout_secs, 30);
    }
}
