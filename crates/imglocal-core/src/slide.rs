//! Layout styles for numbered slide documents (`1.html`, `2.html`, ...).

use once_cell::sync::Lazy;
use regex::Regex;

/// Style block inserted before `</head>` of slide documents.
pub const SLIDE_STYLE_BLOCK: &str = "
    <style>
        html, body {
            height: 100%;
            margin: 0;
            padding: 0;
            overflow: hidden;
        }
        body {
            display: flex;
            justify-content: center;
            align-items: center;
        }
    </style>";

static CLOSING_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</head>").unwrap());

/// Result of [`inject_styles`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleInjection {
    Injected(String),
    /// The block is already in the document (an earlier run added it).
    AlreadyPresent,
    /// No `</head>` to anchor on; the document is left as is.
    MissingHead,
}

/// True for non-empty stems made only of ASCII digits.
pub fn is_slide_stem(stem: &str) -> bool {
    !stem.is_empty() && stem.bytes().all(|b| b.is_ascii_digit())
}

/// Inserts [`SLIDE_STYLE_BLOCK`] and a newline right before the first
/// `</head>` (any case), keeping the tag itself as written.
pub fn inject_styles(text: &str) -> StyleInjection {
    if text.contains(SLIDE_STYLE_BLOCK) {
        return StyleInjection::AlreadyPresent;
    }
    let Some(head) = CLOSING_HEAD.find(text) else {
        return StyleInjection::MissingHead;
    };

    let mut out = String::with_capacity(text.len() + SLIDE_STYLE_BLOCK.len() + 1);
    out.push_str(&text[..head.start()]);
    out.push_str(SLIDE_STYLE_BLOCK);
    out.push('\n');
    out.push_str(&text[head.start()..]);
    StyleInjection::Injected(out)
}
