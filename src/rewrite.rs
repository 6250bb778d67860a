use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::{path::Path, process::Command};

/// Force the embedded create/modify dates of a file to the target date by
/// running exiftool against it. The path and date are passed as separate
/// arguments, never through a shell. Non-zero exit or stderr output is
/// logged and tolerated; a launch failure propagates.
pub fn set_embedded_dates(path: &Path, dt: NaiveDateTime) -> Result<()> {
    let stamp = dt.format("%Y:%m:%d %H:%M:%S").to_string();

    let output = Command::new("exiftool")
        .arg("-overwrite_original")
        .arg(format!("-CreateDate={stamp}"))
        .arg(format!("-ModifyDate={stamp}"))
        .arg(path)
        .output()
        .with_context(|| format!("failed to spawn exiftool for {}", path.display()))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        println!("\texiftool: {}", stdout.trim());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() || !stderr.trim().is_empty() {
        eprintln!(
            "\texiftool failed on {} ({}): {}",
            path.display(),
            output.status,
            stderr.trim()
        );
    }

    Ok(())
}
