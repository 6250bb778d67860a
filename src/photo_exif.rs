use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::{fs::File, io::BufReader, path::Path};

use crate::metadata::{ExifExtended, ExifPrimary};

fn parse_exif_datetime(value: &Value) -> Option<NaiveDateTime> {
    let s = match value {
        Value::Ascii(vec) if !vec.is_empty() => String::from_utf8_lossy(&vec[0]).to_string(),
        _ => return None,
    };

    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S").ok()
}

fn field_datetime(exif: &exif::Exif, tag: Tag) -> Option<NaiveDateTime> {
    exif.get_field(tag, In::PRIMARY)
        .and_then(|f| parse_exif_datetime(&f.value))
}

/// Read the Exif containers of an image file. A file whose headers cannot
/// be parsed yields no containers; a missing tag yields `None` for that
/// field only.
pub fn read_exif_containers(path: &Path) -> (Option<ExifPrimary>, Option<ExifExtended>) {
    let Ok(file) = File::open(path) else {
        return (None, None);
    };
    let mut reader = BufReader::new(file);

    let Ok(exif) = Reader::new().read_from_container(&mut reader) else {
        return (None, None);
    };

    let primary = ExifPrimary {
        date_time: field_datetime(&exif, Tag::DateTime),
    };
    let extended = ExifExtended {
        date_time_original: field_datetime(&exif, Tag::DateTimeOriginal),
        date_time_digitized: field_datetime(&exif, Tag::DateTimeDigitized),
    };

    (Some(primary), Some(extended))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ascii_exif_datetime() {
        let value = Value::Ascii(vec![b"2021:03:15 10:00:00".to_vec()]);
        let dt = parse_exif_datetime(&value).unwrap();
        assert_eq!(crate::time::format_dt(dt), "2021-03-15 10:00:00");
    }

    #[test]
    fn rejects_non_ascii_and_garbage_values() {
        assert!(parse_exif_datetime(&Value::Short(vec![1])).is_none());
        assert!(parse_exif_datetime(&Value::Ascii(vec![])).is_none());
        assert!(parse_exif_datetime(&Value::Ascii(vec![b"not a date".to_vec()])).is_none());
    }

    #[test]
    fn unreadable_file_yields_no_containers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not a jpeg").unwrap();

        let (primary, extended) = read_exif_containers(&path);
        assert!(primary.is_none());
        assert!(extended.is_none());
    }
}
