use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};

use crate::rewrite;

pub fn output_filename(src: &Path, date: NaiveDateTime) -> String {
    let name = src
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file");
    format!("{}_{}", date.format("%Y-%m-%d"), name)
}

fn to_filetime(date: NaiveDateTime) -> FileTime {
    // Naive local wall-clock back to an epoch; earliest() picks the first
    // valid instant around DST transitions.
    let secs = date
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| date.and_utc().timestamp());
    FileTime::from_unix_time(secs, 0)
}

/// Copy `src` into the output directory under a date-prefixed name and
/// stamp the copy's filesystem timestamps with the target date. With
/// `hard_rewrite`, the copy's embedded create/modify dates are rewritten
/// first. Overwrites an existing file at the destination.
pub fn materialize(
    src: &Path,
    date: NaiveDateTime,
    output_dir: &Path,
    hard_rewrite: bool,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;

    let dst = output_dir.join(output_filename(src, date));
    println!("\tRenaming to: {}", dst.display());

    fs::copy(src, &dst)
        .with_context(|| format!("copy {} -> {}", src.display(), dst.display()))?;

    if hard_rewrite {
        rewrite::set_embedded_dates(&dst, date)?;
    }

    let ft = to_filetime(date);
    filetime::set_file_times(&dst, ft, ft)
        .with_context(|| format!("set timestamps on {}", dst.display()))?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn output_name_prefixes_date_and_keeps_extension() {
        let name = output_filename(Path::new("/archive/2021/03/img1.jpg"), dt(2021, 3, 1));
        assert_eq!(name, "2021-03-01_img1.jpg");
    }

    #[test]
    fn copies_bytes_and_stamps_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("img1.jpg");
        fs::write(&src, b"pixels").unwrap();
        let out = dir.path().join("output");

        let date = dt(2021, 3, 1);
        let dst = materialize(&src, date, &out, false).unwrap();

        assert_eq!(dst, out.join("2021-03-01_img1.jpg"));
        assert_eq!(fs::read(&dst).unwrap(), b"pixels");

        let mtime = crate::time::file_mtime(&dst).unwrap();
        assert_eq!(mtime, date);
    }

    #[test]
    fn second_materialization_overwrites_not_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("img1.jpg");
        fs::write(&src, b"pixels").unwrap();
        let out = dir.path().join("output");

        let date = dt(2021, 3, 1);
        let first = materialize(&src, date, &out, false).unwrap();
        let second = materialize(&src, date, &out, false).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(&out).unwrap().count(), 1);
        assert_eq!(fs::read(&second).unwrap(), b"pixels");
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("clip.bin.jpg");
        fs::write(&src, b"x").unwrap();
        let out = dir.path().join("deep").join("output");

        materialize(&src, dt(2020, 1, 15), &out, false).unwrap();
        assert!(out.join("2020-01-15_clip.bin.jpg").exists());
    }
}
