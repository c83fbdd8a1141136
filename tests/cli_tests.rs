//! Integration tests for the shellshot CLI.
//!
//! These run the built binary and check output and exit codes for the flag
//! surface that never touches a capture tool (--help, --version, invalid
//! format).

use std::process::Command;

fn get_binary_path() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{}/target/debug/shellshot", manifest_dir)
}

fn ensure_binary_built() {
    let status = Command::new("cargo")
        .args(["build", "--bin", "shellshot"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .status()
        .expect("Failed to build binary");

    assert!(status.success(), "Failed to build shellshot binary");
}

#[test]
fn test_help_exits_zero_with_usage() {
    ensure_binary_built();

    let output = Command::new(get_binary_path())
        .arg("--help")
        .output()
        .expect("Failed to execute shellshot");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "help should print usage: {stdout}");
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--output"));
}

#[test]
fn test_short_help_flag() {
    ensure_binary_built();

    let output = Command::new(get_binary_path())
        .arg("-h")
        .output()
        .expect("Failed to execute shellshot");

    assert!(output.status.success());
}

#[test]
fn test_version_exits_zero() {
    ensure_binary_built();

    for flag in ["--version", "-v"] {
        let output = Command::new(get_binary_path())
            .arg(flag)
            .output()
            .expect("Failed to execute shellshot");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(
            stdout.contains(env!("CARGO_PKG_VERSION")),
            "version output should carry the crate version: {stdout}"
        );
    }
}

#[test]
fn test_unsupported_format_exits_one_before_capturing() {
    ensure_binary_built();

    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(get_binary_path())
        .args(["--format", "tiff", "--output"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute shellshot");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported format"), "got: {stderr}");
    assert!(stderr.contains("tiff"));
    // Validation failed before any tool ran, so nothing was written.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
