use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;
use std::{path::Path, process::Command};

use crate::metadata::VideoHeader;

fn parse_exiftool_datetime(s: &str) -> Option<NaiveDateTime> {
    // QuickTime dates may carry a UTC offset suffix; take the wall-clock part.
    let s = s.get(..19).unwrap_or(s);
    NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S").ok()
}

/// Probe the QuickTime movie header of a video file for its created and
/// modified dates. Any failure (tool missing, non-zero exit, malformed
/// output) yields no container.
pub fn quicktime_header_dates(path: &Path) -> Option<VideoHeader> {
    let output = Command::new("exiftool")
        .arg("-j")
        .arg("-QuickTime:CreateDate")
        .arg("-QuickTime:ModifyDate")
        .arg(path)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let json: Vec<JsonValue> = serde_json::from_slice(&output.stdout).ok()?;
    let entry = json.into_iter().next()?;

    let created = entry
        .get("CreateDate")
        .and_then(|v| v.as_str())
        .and_then(parse_exiftool_datetime);
    let modified = entry
        .get("ModifyDate")
        .and_then(|v| v.as_str())
        .and_then(parse_exiftool_datetime);

    Some(VideoHeader { created, modified })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_exiftool_datetime() {
        let dt = parse_exiftool_datetime("2019:08:02 14:30:05").unwrap();
        assert_eq!(crate::time::format_dt(dt), "2019-08-02 14:30:05");
    }

    #[test]
    fn drops_utc_offset_suffix() {
        let dt = parse_exiftool_datetime("2019:08:02 14:30:05+02:00").unwrap();
        assert_eq!(crate::time::format_dt(dt), "2019-08-02 14:30:05");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_exiftool_datetime("0000").is_none());
        assert!(parse_exiftool_datetime("").is_none());
    }
}
