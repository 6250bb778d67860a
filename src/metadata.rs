use chrono::NaiveDateTime;
use std::path::Path;

use crate::classify::{Kind, classify};
use crate::{photo_exif, time, video_meta};

/// Primary Exif IFD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExifPrimary {
    pub date_time: Option<NaiveDateTime>,
}

/// Exif SubIFD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExifExtended {
    pub date_time_original: Option<NaiveDateTime>,
    pub date_time_digitized: Option<NaiveDateTime>,
}

/// QuickTime movie header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoHeader {
    pub created: Option<NaiveDateTime>,
    pub modified: Option<NaiveDateTime>,
}

/// Dates derived from the filesystem itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileInfo {
    pub modified: Option<NaiveDateTime>,
}

/// The typed metadata containers found for one file. Absence of a container
/// or of a field within it is an expected outcome, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContainerSet {
    pub exif_primary: Option<ExifPrimary>,
    pub exif_extended: Option<ExifExtended>,
    pub video_header: Option<VideoHeader>,
    pub file_info: Option<FileInfo>,
}

impl ContainerSet {
    pub fn read(path: &Path) -> ContainerSet {
        let mut set = ContainerSet::default();

        match classify(path) {
            Kind::Photo => {
                let (primary, extended) = photo_exif::read_exif_containers(path);
                set.exif_primary = primary;
                set.exif_extended = extended;
            }
            Kind::Video => {
                set.video_header = video_meta::quicktime_header_dates(path);
            }
            Kind::Ignore => {}
        }

        set.file_info = Some(FileInfo {
            modified: time::file_mtime(path),
        });

        set
    }

    /// Overwrite every date-bearing field of every container present with
    /// the target date.
    pub fn set_all_dates(&mut self, dt: NaiveDateTime) {
        if let Some(primary) = &mut self.exif_primary {
            primary.date_time = Some(dt);
        }
        if let Some(extended) = &mut self.exif_extended {
            extended.date_time_original = Some(dt);
            extended.date_time_digitized = Some(dt);
        }
        if let Some(header) = &mut self.video_header {
            header.created = Some(dt);
            header.modified = Some(dt);
        }
        if let Some(info) = &mut self.file_info {
            info.modified = Some(dt);
        }
    }
}
