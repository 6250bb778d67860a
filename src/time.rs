use chrono::{DateTime, Local, NaiveDateTime};
use std::{path::Path, time::SystemTime};

pub fn file_mtime(path: &Path) -> Option<NaiveDateTime> {
    let meta = std::fs::metadata(path).ok()?;
    let modified: SystemTime = meta.modified().ok()?;
    let dt: DateTime<Local> = modified.into();
    Some(dt.naive_local())
}

/// Creation time of the file, falling back to the modification time on
/// filesystems that do not record one.
pub fn file_created(path: &Path) -> Option<NaiveDateTime> {
    let meta = std::fs::metadata(path).ok()?;
    let created: SystemTime = meta.created().or_else(|_| meta.modified()).ok()?;
    let dt: DateTime<Local> = created.into();
    Some(dt.naive_local())
}

pub fn format_dt(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use std::io::Write;

    #[test]
    fn format_is_date_space_time() {
        let dt = NaiveDate::from_ymd_opt(2021, 3, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(format_dt(dt), "2021-03-15 10:00:00");
    }

    #[test]
    fn mtime_and_created_exist_for_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.jpg");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"x").unwrap();

        let mtime = file_mtime(&path).expect("mtime");
        let created = file_created(&path).expect("created");
        // Both should be sane wall-clock values, not epoch zero.
        assert!(mtime.and_utc().timestamp() > 0);
        assert!(created.and_utc().timestamp() > 0);
        let _ = mtime.hour();
    }

    #[test]
    fn missing_file_yields_none() {
        assert!(file_mtime(Path::new("/nonexistent/file.jpg")).is_none());
        assert!(file_created(Path::new("/nonexistent/file.jpg")).is_none());
    }
}
