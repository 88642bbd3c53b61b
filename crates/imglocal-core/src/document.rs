//! Per-document pipeline: backup, decode, optional slide styles, rewrite,
//! single write-back as UTF-8.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::backup::{backup_document, BackupOutcome};
use crate::encoding::{read_text_best_effort, SourceEncoding};
use crate::fetch::Fetcher;
use crate::rewrite::{Rewriter, SavedImage, SkippedReference};
use crate::slide::{self, StyleInjection};
use crate::storage::{ensure_dir, write_atomic};

/// Where and how documents are localized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizeOptions {
    pub images_dir: PathBuf,
    pub backup_dir: PathBuf,
    /// Inject layout styles into documents with a purely numeric stem.
    pub slide_styles: bool,
    pub rewriter: Rewriter,
}

impl LocalizeOptions {
    /// Default layout next to the documents: `<root>/images` and `<root>/_old`.
    pub fn in_root(root: &Path) -> Self {
        Self {
            images_dir: root.join("images"),
            backup_dir: root.join("_old"),
            slide_styles: true,
            rewriter: Rewriter::default(),
        }
    }
}

/// What happened to the slide styles of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylesOutcome {
    /// Not a slide document, or styles are disabled.
    NotApplicable,
    Injected,
    AlreadyPresent,
    MissingHead,
}

/// Outcome of [`process_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub document: PathBuf,
    pub saved: Vec<SavedImage>,
    /// Remote references left unchanged because their image was not saved.
    pub skipped: Vec<SkippedReference>,
    /// `None` when the backup could not be made.
    pub backup: Option<BackupOutcome>,
    pub styles: StylesOutcome,
    pub encoding: SourceEncoding,
}

impl DocumentReport {
    pub fn downloaded(&self) -> usize {
        self.saved.len()
    }

    /// True when the rewrite changed anything besides the encoding.
    pub fn changed(&self) -> bool {
        self.downloaded() > 0 || self.styles == StylesOutcome::Injected
    }
}

/// Localizes the remote images of one HTML document in place.
///
/// The new text is built entirely in memory and replaces the document in a
/// single rename, so a failed write leaves the original intact. Backup and
/// per-image failures are logged and do not fail the document; an `Err`
/// means the document could not be read, written, or its directories created.
pub fn process_document<F>(
    document: &Path,
    options: &LocalizeOptions,
    fetcher: &F,
) -> Result<DocumentReport>
where
    F: Fetcher + ?Sized,
{
    tracing::info!("processing {}", document.display());
    ensure_dir(&options.images_dir)?;
    ensure_dir(&options.backup_dir)?;

    let backup = match backup_document(document, &options.backup_dir) {
        Ok(outcome) => {
            if let BackupOutcome::Created(path) = &outcome {
                tracing::info!("backup written to {}", path.display());
            }
            Some(outcome)
        }
        Err(e) => {
            tracing::warn!("no backup for {}: {:#}", document.display(), e);
            None
        }
    };

    let decoded = read_text_best_effort(document)?;
    if decoded.encoding != SourceEncoding::Utf8 {
        tracing::info!(
            "{} decoded as {}, will be written as UTF-8",
            document.display(),
            decoded.encoding
        );
    }

    let stem = document_stem(document);
    let (text, styles) = apply_slide_styles(decoded.text, &stem, document, options.slide_styles);

    let outcome = options
        .rewriter
        .rewrite(&text, &stem, &options.images_dir, fetcher);

    write_atomic(document, outcome.text.as_bytes())?;
    tracing::info!(
        "updated {} ({} images downloaded, {} left remote)",
        document.display(),
        outcome.downloaded(),
        outcome.skipped.len()
    );

    Ok(DocumentReport {
        document: document.to_path_buf(),
        saved: outcome.saved,
        skipped: outcome.skipped,
        backup,
        styles,
        encoding: decoded.encoding,
    })
}

fn document_stem(document: &Path) -> String {
    document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn apply_slide_styles(
    text: String,
    stem: &str,
    document: &Path,
    enabled: bool,
) -> (String, StylesOutcome) {
    if !enabled || !slide::is_slide_stem(stem) {
        return (text, StylesOutcome::NotApplicable);
    }
    match slide::inject_styles(&text) {
        StyleInjection::Injected(new_text) => {
            tracing::info!("slide styles added to {}", document.display());
            (new_text, StylesOutcome::Injected)
        }
        StyleInjection::AlreadyPresent => {
            tracing::debug!("slide styles already present in {}", document.display());
            (text, StylesOutcome::AlreadyPresent)
        }
        StyleInjection::MissingHead => {
            tracing::warn!(
                "no </head> in {}, slide styles not added",
                document.display()
            );
            (text, StylesOutcome::MissingHead)
        }
    }
}
