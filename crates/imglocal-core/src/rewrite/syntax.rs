//! The two ways a document can embed an image location.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

/// `<img ... src="...">` with a single- or double-quoted value.
static IMG_SRC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(<img\b[^>]*?\bsrc\s*=\s*)(?:"([^"']+)"|'([^"']+)')"#).unwrap()
});

/// `url(...)` with an optional quote that must be the same on both sides.
static CSS_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(\burl\s*\(\s*)(?:"([^)"']+)"|'([^)"']+)'|([^)"']+))(\s*\))"#).unwrap()
});

/// A reference syntax recognized by the rewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSyntax {
    /// `src` attribute of an `<img>` tag.
    ImgSrc,
    /// CSS `url(...)`, wherever it appears in the text.
    CssUrl,
}

/// One located reference, borrowing from the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference<'t> {
    pub syntax: ReferenceSyntax,
    /// Byte range of the whole match.
    pub span: Range<usize>,
    /// Everything before the opening quote, e.g. `<img class="x" src=`.
    pub prefix: &'t str,
    /// `"`, `'` or empty.
    pub quote: &'static str,
    /// The value between the quotes, untrimmed.
    pub value: &'t str,
    /// Everything after the closing quote, e.g. ` )` for `url(...)`.
    pub suffix: &'t str,
}

impl<'t> ImageReference<'t> {
    /// The value with surrounding whitespace removed, as used for fetching.
    pub fn url(&self) -> &'t str {
        self.value.trim()
    }

    /// Same delimiters, new value.
    pub fn with_value(&self, value: &str) -> String {
        format!(
            "{}{}{}{}{}",
            self.prefix, self.quote, value, self.quote, self.suffix
        )
    }
}

impl ReferenceSyntax {
    fn pattern(self) -> &'static Regex {
        match self {
            ReferenceSyntax::ImgSrc => &IMG_SRC,
            ReferenceSyntax::CssUrl => &CSS_URL,
        }
    }

    /// All non-overlapping references of this syntax, left to right.
    pub fn find_all(self, text: &str) -> impl Iterator<Item = ImageReference<'_>> + '_ {
        self.pattern()
            .captures_iter(text)
            .filter_map(move |caps| self.reference(&caps))
    }

    fn reference<'t>(self, caps: &Captures<'t>) -> Option<ImageReference<'t>> {
        let whole = caps.get(0)?;
        let prefix = caps.get(1)?.as_str();
        let (quote, value) = [("\"", 2), ("'", 3), ("", 4)]
            .into_iter()
            .find_map(|(quote, group)| caps.get(group).map(|m| (quote, m.as_str())))?;
        let suffix = match self {
            ReferenceSyntax::ImgSrc => "",
            ReferenceSyntax::CssUrl => caps.get(5)?.as_str(),
        };
        Some(ImageReference {
            syntax: self,
            span: whole.range(),
            prefix,
            quote,
            value,
            suffix,
        })
    }
}
