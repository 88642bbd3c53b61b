//! Extension extraction from a URL path.

use super::IMAGE_EXTENSIONS;

/// Returns the image extension of the URL's last non-empty path segment, if
/// it is a known one. `.jpeg` is normalized to `.jpg`; query and fragment are
/// ignored, and so is a trailing slash.
pub fn extension_from_url_path(url: &str) -> Option<&'static str> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').find(|s| !s.is_empty())?;
    let dot = segment.rfind('.')?;
    // A leading dot is a hidden name, not a suffix.
    if dot == 0 {
        return None;
    }
    let suffix = segment[dot..].to_ascii_lowercase();
    let known = IMAGE_EXTENSIONS.iter().copied().find(|ext| *ext == suffix)?;
    Some(if known == ".jpeg" { ".jpg" } else { known })
}
