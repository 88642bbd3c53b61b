//! Content-Type header mapping.

/// Maps a declared `Content-Type` value to an image extension.
///
/// Parameters after `;` are dropped and the media type is compared
/// case-insensitively.
pub fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    let media_type = content_type.split(';').next()?.trim().to_ascii_lowercase();
    let ext = match media_type.as_str() {
        "image/jpeg" | "image/jpg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/svg+xml" => ".svg",
        "image/bmp" => ".bmp",
        "image/x-icon" | "image/vnd.microsoft.icon" => ".ico",
        _ => return None,
    };
    Some(ext)
}
