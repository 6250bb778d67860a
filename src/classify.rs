use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Photo,
    Video,
    Ignore,
}

pub fn normalize_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
}

pub fn classify(path: &Path) -> Kind {
    let extension = normalize_extension(path);
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") | Some("png") | Some("gif") | Some("heic") | Some("heif")
        | Some("tiff") | Some("bmp") | Some("raw") => Kind::Photo,
        Some("mp4") | Some("mov") | Some("3gp") | Some("avi") | Some("mkv") | Some("webm")
        | Some("wmv") | Some("flv") | Some("m4v") => Kind::Video,
        _ => Kind::Ignore,
    }
}

pub fn is_media_file(path: &Path) -> bool {
    !matches!(classify(path), Kind::Ignore)
}
