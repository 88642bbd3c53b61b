//! URL classification and image extension inference.
//!
//! Decides whether a reference points at a remote image and which file
//! extension a downloaded copy should get.

mod content_type;
mod path;

pub use content_type::extension_from_content_type;
pub use path::extension_from_url_path;

/// Extension used when neither the URL nor the content type says anything useful.
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Extensions accepted from a URL path, lower-case with leading dot.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp", ".ico",
];

/// True when `value` starts with `http://` or `https://` (ASCII case-insensitive).
pub fn is_remote_url(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

/// Resolves the extension (with leading dot) for an image saved from `url`.
///
/// The URL path wins when it carries a known image extension; otherwise the
/// declared content type is consulted, and `.jpg` is the last resort.
///
/// # Examples
///
/// - `resolve_extension("https://x/a.PNG", Some("image/gif"))` → `".png"`
/// - `resolve_extension("https://x/a", Some("image/webp; q=1"))` → `".webp"`
/// - `resolve_extension("https://x/a", None)` → `".jpg"`
pub fn resolve_extension(url: &str, content_type: Option<&str>) -> &'static str {
    extension_from_url_path(url)
        .or_else(|| content_type.and_then(extension_from_content_type))
        .unwrap_or(DEFAULT_EXTENSION)
}
