//! Reference scanning and rewriting.
//!
//! The rewriter runs one single pass per [`ReferenceSyntax`], in order, over
//! the output of the previous pass. Every remote reference is handed to the
//! shared fetch-and-save routine; on success the reference is replaced by a
//! path into the images directory, on failure it is emitted unchanged and
//! recorded as a [`SkippedReference`].
//!
//! The per-document sequence number is not a counter living beside the scan:
//! it is derived from the list of saved images, which is threaded through the
//! passes as an explicit accumulator ([`ScanState`]).

mod save;
mod syntax;

pub use save::ImageSaver;
pub use syntax::{ImageReference, ReferenceSyntax};

use std::path::{Path, PathBuf};

use crate::fetch::Fetcher;
use crate::url_model::is_remote_url;

/// An image downloaded and written for one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    /// URL as it appeared in the document (trimmed).
    pub url: String,
    /// 1-based rank among successful downloads of the document.
    pub sequence: u32,
    /// Where the bytes were written.
    pub path: PathBuf,
    /// Value written into the document: `<images dir name>/<file name>`.
    pub local_ref: String,
}

/// A remote reference left as it was because its image could not be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedReference {
    pub url: String,
    pub reason: String,
}

/// Accumulator threaded through the scan: what has been saved or skipped so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    pub saved: Vec<SavedImage>,
    pub skipped: Vec<SkippedReference>,
}

impl ScanState {
    /// Sequence number the next successful download will take.
    pub fn next_sequence(&self) -> u32 {
        self.saved.len() as u32 + 1
    }

    fn record(mut self, image: SavedImage) -> Self {
        self.saved.push(image);
        self
    }

    fn skip(mut self, skipped: SkippedReference) -> Self {
        self.skipped.push(skipped);
        self
    }
}

/// Rewritten text, the images saved while producing it and the remote
/// references that were left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub text: String,
    pub saved: Vec<SavedImage>,
    pub skipped: Vec<SkippedReference>,
}

impl RewriteOutcome {
    pub fn downloaded(&self) -> usize {
        self.saved.len()
    }
}

/// Ordered list of syntaxes to rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewriter {
    syntaxes: Vec<ReferenceSyntax>,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new(vec![ReferenceSyntax::ImgSrc, ReferenceSyntax::CssUrl])
    }
}

impl Rewriter {
    pub fn new(syntaxes: Vec<ReferenceSyntax>) -> Self {
        Self { syntaxes }
    }

    pub fn syntaxes(&self) -> &[ReferenceSyntax] {
        &self.syntaxes
    }

    /// Localizes every remote reference in `text`.
    ///
    /// Images are named `<stem>-<n><ext>` inside `images_dir`, which must exist.
    pub fn rewrite<F>(&self, text: &str, stem: &str, images_dir: &Path, fetcher: &F) -> RewriteOutcome
    where
        F: Fetcher + ?Sized,
    {
        let saver = ImageSaver::new(fetcher, images_dir, stem);
        self.rewrite_with(text, |url, sequence| saver.save(url, sequence))
    }

    /// Like [`Rewriter::rewrite`] but with an arbitrary localizer: given a
    /// remote URL and the sequence number it would take, it returns the saved
    /// image or the reason to leave the reference alone.
    pub fn rewrite_with<L>(&self, text: &str, mut localize: L) -> RewriteOutcome
    where
        L: FnMut(&str, u32) -> Result<SavedImage, SkippedReference>,
    {
        let (text, state) = self.syntaxes.iter().fold(
            (text.to_string(), ScanState::default()),
            |(text, state), &syntax| rewrite_pass(&text, syntax, state, &mut localize),
        );
        RewriteOutcome {
            text,
            saved: state.saved,
            skipped: state.skipped,
        }
    }
}

/// One left-to-right pass over `text` for a single syntax.
fn rewrite_pass<L>(
    text: &str,
    syntax: ReferenceSyntax,
    state: ScanState,
    localize: &mut L,
) -> (String, ScanState)
where
    L: FnMut(&str, u32) -> Result<SavedImage, SkippedReference>,
{
    let (mut out, copied_to, state) = syntax.find_all(text).fold(
        (String::with_capacity(text.len()), 0usize, state),
        |(mut out, copied_to, state), reference| {
            out.push_str(&text[copied_to..reference.span.start]);
            let state = match localize_reference(&reference, &state, localize) {
                Some(Ok(image)) => {
                    out.push_str(&reference.with_value(&image.local_ref));
                    state.record(image)
                }
                Some(Err(skipped)) => {
                    out.push_str(&text[reference.span.clone()]);
                    state.skip(skipped)
                }
                None => {
                    out.push_str(&text[reference.span.clone()]);
                    state
                }
            };
            (out, reference.span.end, state)
        },
    );
    out.push_str(&text[copied_to..]);
    (out, state)
}

/// `None` for references that are not remote and never reach the localizer.
fn localize_reference<L>(
    reference: &ImageReference<'_>,
    state: &ScanState,
    localize: &mut L,
) -> Option<Result<SavedImage, SkippedReference>>
where
    L: FnMut(&str, u32) -> Result<SavedImage, SkippedReference>,
{
    let url = reference.url();
    if !is_remote_url(url) {
        tracing::debug!("leaving local reference {:?} as is", url);
        return None;
    }
    Some(localize(url, state.next_sequence()))
}
