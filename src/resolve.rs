use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::path::Path;

use crate::metadata::ContainerSet;

/// Which cascade rule supplied the resolved date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    ExifOriginal,
    ExifDigitized,
    ExifDateTime,
    ExifDateTimeUngated,
    QuickTimeModified,
    QuickTimeCreated,
    FileModified,
}

impl DateSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DateSource::ExifOriginal => "exif date/time original",
            DateSource::ExifDigitized => "exif date/time digitized",
            DateSource::ExifDateTime => "exif date/time",
            DateSource::ExifDateTimeUngated => "exif date/time (outside path month)",
            DateSource::QuickTimeModified => "quicktime modified",
            DateSource::QuickTimeCreated => "quicktime created",
            DateSource::FileModified => "file modified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDate {
    pub date: NaiveDateTime,
    pub source: DateSource,
}

/// Build the reference date from the last two segments of the containing
/// directory: `.../<year>/<month>` becomes day 1, 00:00:00 of that month.
pub fn path_reference_date(dir: &Path) -> Result<NaiveDateTime> {
    let mut segments = dir.iter().rev().filter_map(|s| s.to_str());
    let month_segment = segments
        .next()
        .with_context(|| format!("no month segment in {}", dir.display()))?;
    let year_segment = segments
        .next()
        .with_context(|| format!("no year segment in {}", dir.display()))?;

    let year: i32 = year_segment
        .parse()
        .with_context(|| format!("year segment {year_segment:?} is not an integer"))?;
    let month: u32 = month_segment
        .parse()
        .with_context(|| format!("month segment {month_segment:?} is not an integer"))?;

    let date = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("{year}/{month} is not a valid year/month"))?;

    Ok(date.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
}

type Extract = fn(&ContainerSet) -> Option<NaiveDateTime>;

struct Rule {
    extract: Extract,
    month_gated: bool,
    source: DateSource,
}

// Evaluated top to bottom, first qualifying candidate wins. Note the
// Exif date/time field appears twice: once month-gated, once not, so an
// Exif date outside the path month still beats the video and file rules.
const RULES: &[Rule] = &[
    Rule {
        extract: |s| s.exif_extended?.date_time_original,
        month_gated: true,
        source: DateSource::ExifOriginal,
    },
    Rule {
        extract: |s| s.exif_extended?.date_time_digitized,
        month_gated: true,
        source: DateSource::ExifDigitized,
    },
    Rule {
        extract: |s| s.exif_primary?.date_time,
        month_gated: true,
        source: DateSource::ExifDateTime,
    },
    Rule {
        extract: |s| s.exif_primary?.date_time,
        month_gated: false,
        source: DateSource::ExifDateTimeUngated,
    },
    Rule {
        extract: |s| s.video_header?.modified,
        month_gated: true,
        source: DateSource::QuickTimeModified,
    },
    Rule {
        extract: |s| s.video_header?.created,
        month_gated: true,
        source: DateSource::QuickTimeCreated,
    },
    Rule {
        extract: |s| s.file_info?.modified,
        month_gated: true,
        source: DateSource::FileModified,
    },
];

fn same_month(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Run the cascade against one file's containers. Returns the first
/// candidate that qualifies, or `None` when no rule produced a value.
pub fn resolve_date(set: &ContainerSet, reference: NaiveDateTime) -> Option<ResolvedDate> {
    for rule in RULES {
        if let Some(date) = (rule.extract)(set) {
            if !rule.month_gated || same_month(date, reference) {
                return Some(ResolvedDate {
                    date,
                    source: rule.source,
                });
            }
        }
    }

    None
}
