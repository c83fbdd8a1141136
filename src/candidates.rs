//! Command-table construction.
//!
//! For a given (platform, format, destination path) this module produces the
//! ordered list of external commands the executor will try. List order is the
//! fallback preference: the most modern, most likely correct tool first,
//! best-effort defensive entries last.

use crate::types::{ImageFormat, Platform};
use std::path::{Path, PathBuf};

/// One external-tool invocation attempt.
#[derive(Debug, Clone)]
pub struct CandidateCommand {
    /// Identifying tool name reported in results and errors.
    pub tool: &'static str,
    pub program: String,
    pub args: Vec<String>,
    /// File the tool is expected to write. May differ from the requested
    /// path when the tool dictates its own format (macOS bmp/webp).
    pub output_path: PathBuf,
    /// Format the tool will actually encode.
    pub effective_format: ImageFormat,
}

/// Build the ranked candidate list for a capture.
///
/// Never empty on any platform: the trailing defensive entries are appended
/// unconditionally.
pub fn build_candidates(
    platform: Platform,
    format: ImageFormat,
    quality: u8,
    path: &Path,
) -> Vec<CandidateCommand> {
    let quality = quality.clamp(1, 100);
    match platform {
        Platform::Windows => windows_candidates(format, path),
        Platform::MacOs => macos_candidates(format, path),
        Platform::Unix => unix_candidates(format, quality, path),
    }
}

/// GDI+ encoder identifier for a format. WebP has no native encoder, so the
/// script saves PNG into the requested path instead.
fn gdi_encoder(format: ImageFormat) -> (&'static str, ImageFormat) {
    match format {
        ImageFormat::Png => ("Png", ImageFormat::Png),
        ImageFormat::Jpg | ImageFormat::Jpeg => ("Jpeg", format),
        ImageFormat::Bmp => ("Bmp", ImageFormat::Bmp),
        ImageFormat::WebP => ("Png", ImageFormat::Png),
    }
}

fn windows_candidates(format: ImageFormat, path: &Path) -> Vec<CandidateCommand> {
    let path_str = path.display().to_string();
    let (encoder, effective) = gdi_encoder(format);
    // Single-quoted PowerShell string literal; embedded quotes double up.
    let ps_path = path_str.replace('\'', "''");
    let script = format!(
        "Add-Type -AssemblyName System.Windows.Forms,System.Drawing; \
         $bounds = [System.Windows.Forms.Screen]::PrimaryScreen.Bounds; \
         $bmp = New-Object System.Drawing.Bitmap $bounds.Width, $bounds.Height; \
         $gfx = [System.Drawing.Graphics]::FromImage($bmp); \
         $gfx.CopyFromScreen($bounds.Location, [System.Drawing.Point]::Empty, $bounds.Size); \
         $bmp.Save('{ps_path}', [System.Drawing.Imaging.ImageFormat]::{encoder}); \
         $gfx.Dispose(); $bmp.Dispose()"
    );

    vec![
        CandidateCommand {
            tool: "powershell",
            program: "powershell".to_string(),
            args: vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                script,
            ],
            output_path: path.to_path_buf(),
            effective_format: effective,
        },
        CandidateCommand {
            tool: "nircmd",
            program: "nircmd".to_string(),
            args: vec!["savescreenshot".to_string(), path_str.clone()],
            output_path: path.to_path_buf(),
            effective_format: format,
        },
        // Unix-style fallback; not expected to exist on Windows.
        CandidateCommand {
            tool: "import",
            program: "import".to_string(),
            args: vec!["-window".to_string(), "root".to_string(), path_str],
            output_path: path.to_path_buf(),
            effective_format: format,
        },
    ]
}

fn macos_candidates(format: ImageFormat, path: &Path) -> Vec<CandidateCommand> {
    // screencapture only speaks png/jpg; anything else is redirected to a
    // .png sibling and surfaced through effective_format.
    let (target, effective) = match format {
        ImageFormat::Png | ImageFormat::Jpg | ImageFormat::Jpeg => (path.to_path_buf(), format),
        ImageFormat::Bmp | ImageFormat::WebP => (path.with_extension("png"), ImageFormat::Png),
    };
    let target_str = target.display().to_string();

    let mut base_args = vec!["-x".to_string()];
    if effective != ImageFormat::Png {
        base_args.push("-t".to_string());
        base_args.push(effective.extension().to_string());
    }

    let mut full_args = base_args.clone();
    full_args.push(target_str.clone());

    // Frontmost-window variant as the second attempt.
    let mut window_args = vec!["-x".to_string(), "-w".to_string()];
    window_args.extend(base_args.into_iter().skip(1));
    window_args.push(target_str);

    vec![
        CandidateCommand {
            tool: "screencapture",
            program: "screencapture".to_string(),
            args: full_args,
            output_path: target.clone(),
            effective_format: effective,
        },
        CandidateCommand {
            tool: "screencapture",
            program: "screencapture".to_string(),
            args: window_args,
            output_path: target,
            effective_format: effective,
        },
    ]
}

fn unix_candidates(format: ImageFormat, quality: u8, path: &Path) -> Vec<CandidateCommand> {
    let path_str = path.display().to_string();
    let mut candidates = Vec::with_capacity(6);

    // Wayland-native tool first, and only for formats it can encode. The
    // remaining entries are best-effort and appended regardless of format.
    if matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpg | ImageFormat::Jpeg | ImageFormat::WebP
    ) {
        let args = match format {
            ImageFormat::Jpg | ImageFormat::Jpeg => vec![
                "-t".to_string(),
                "jpeg".to_string(),
                "-q".to_string(),
                quality.to_string(),
                path_str.clone(),
            ],
            // grim infers png/webp from the file extension.
            _ => vec![path_str.clone()],
        };
        candidates.push(CandidateCommand {
            tool: "grim",
            program: "grim".to_string(),
            args,
            output_path: path.to_path_buf(),
            effective_format: format,
        });
    }

    candidates.push(CandidateCommand {
        tool: "gnome-screenshot",
        program: "gnome-screenshot".to_string(),
        args: vec!["-f".to_string(), path_str.clone()],
        output_path: path.to_path_buf(),
        effective_format: format,
    });
    candidates.push(CandidateCommand {
        tool: "spectacle",
        program: "spectacle".to_string(),
        args: vec![
            "-b".to_string(),
            "-n".to_string(),
            "-o".to_string(),
            path_str.clone(),
        ],
        output_path: path.to_path_buf(),
        effective_format: format,
    });
    let scrot_args = if format.is_lossy() {
        vec!["-q".to_string(), quality.to_string(), path_str.clone()]
    } else {
        vec![path_str.clone()]
    };
    candidates.push(CandidateCommand {
        tool: "scrot",
        program: "scrot".to_string(),
        args: scrot_args,
        output_path: path.to_path_buf(),
        effective_format: format,
    });
    candidates.push(CandidateCommand {
        tool: "maim",
        program: "maim".to_string(),
        args: vec![path_str.clone()],
        output_path: path.to_path_buf(),
        effective_format: format,
    });
    candidates.push(CandidateCommand {
        tool: "import",
        program: "import".to_string(),
        args: vec!["-window".to_string(), "root".to_string(), path_str],
        output_path: path.to_path_buf(),
        effective_format: format,
    });

    candidates
}
