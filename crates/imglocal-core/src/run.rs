//! Run over every HTML document of one directory.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{process_document, DocumentReport, LocalizeOptions};
use crate::fetch::Fetcher;

/// File extensions treated as HTML documents (compared case-insensitively).
pub const DOCUMENT_EXTENSIONS: &[&str] = &["html", "htm"];

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub document: PathBuf,
    pub error: String,
}

/// Progress of a directory run, reported as it happens.
#[derive(Debug, Clone, Copy)]
pub enum DocumentEvent<'a> {
    Started(&'a Path),
    Processed(&'a DocumentReport),
    Failed(&'a DocumentFailure),
}

/// Everything a directory run did, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reports: Vec<DocumentReport>,
    pub failures: Vec<DocumentFailure>,
}

impl RunSummary {
    pub fn documents(&self) -> usize {
        self.reports.len() + self.failures.len()
    }

    pub fn downloaded(&self) -> usize {
        self.reports.iter().map(DocumentReport::downloaded).sum()
    }
}

/// HTML documents directly inside `root`, sorted by file name. Hidden names
/// (leading `.`) are skipped.
pub fn discover_documents(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(root).with_context(|| format!("read directory {}", root.display()))?;
    let mut documents = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory {}", root.display()))?;
        let path = entry.path();
        if path.is_file() && is_document(&path) {
            documents.push(path);
        }
    }
    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(documents)
}

fn is_document(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .map_or(true, |name| name.to_string_lossy().starts_with('.'));
    !hidden
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                DOCUMENT_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
}

/// Processes every document in `root` one after another.
///
/// A missing `root` is the only error; a document that fails is recorded in
/// [`RunSummary::failures`] and the run moves on to the next one.
pub fn run_directory<F>(root: &Path, options: &LocalizeOptions, fetcher: &F) -> Result<RunSummary>
where
    F: Fetcher + ?Sized,
{
    run_directory_with(root, options, fetcher, |_| {})
}

/// [`run_directory`] that calls `on_event` before and after each document.
pub fn run_directory_with<F, P>(
    root: &Path,
    options: &LocalizeOptions,
    fetcher: &F,
    mut on_event: P,
) -> Result<RunSummary>
where
    F: Fetcher + ?Sized,
    P: FnMut(DocumentEvent<'_>),
{
    if !root.is_dir() {
        bail!("directory {} does not exist", root.display());
    }

    let documents = discover_documents(root)?;
    if documents.is_empty() {
        tracing::info!("no HTML documents in {}", root.display());
    }

    let mut summary = RunSummary::default();
    for document in documents {
        on_event(DocumentEvent::Started(&document));
        match process_document(&document, options, fetcher) {
            Ok(report) => {
                on_event(DocumentEvent::Processed(&report));
                summary.reports.push(report);
            }
            Err(e) => {
                tracing::warn!("failed to process {}: {:#}", document.display(), e);
                let failure = DocumentFailure {
                    document,
                    error: format!("{:#}", e),
                };
                on_event(DocumentEvent::Failed(&failure));
                summary.failures.push(failure);
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, FetchedImage};

    struct Offline;

    impl Fetcher for Offline {
        fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    #[test]
    fn discovers_sorted_top_level_html_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.html", "a.HTM", "10.html", "notes.txt", "c.html.bak"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.html")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.html"), "x").unwrap();

        let names: Vec<_> = discover_documents(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["10.html", "a.HTM", "b.html"]);
    }

    #[test]
    fn hidden_documents_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        for name in [".draft.html", ".html", "page.html"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        let documents = discover_documents(dir.path()).unwrap();
        assert_eq!(documents, vec![dir.path().join("page.html")]);
    }

    #[test]
    fn events_arrive_per_document_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.html"), "<p>a</p>").unwrap();
        fs::write(dir.path().join("b.html"), "<p>b</p>").unwrap();
        let mut seen = Vec::new();

        let summary = run_directory_with(
            dir.path(),
            &LocalizeOptions::in_root(dir.path()),
            &Offline,
            |event| {
                seen.push(match event {
                    DocumentEvent::Started(path) => format!("start {}", file_name(path)),
                    DocumentEvent::Processed(report) => {
                        format!("done {}", file_name(&report.document))
                    }
                    DocumentEvent::Failed(failure) => {
                        format!("fail {}", file_name(&failure.document))
                    }
                })
            },
        )
        .unwrap();

        assert_eq!(summary.documents(), 2);
        assert_eq!(seen, vec!["start a.html", "done a.html", "start b.html", "done b.html"]);
    }

    fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("absent");
        let result = run_directory(&root, &LocalizeOptions::in_root(&root), &Offline);
        assert!(result.is_err());
    }

    #[test]
    fn empty_directory_is_a_normal_run() {
        let dir = tempfile::tempdir().unwrap();
        let summary =
            run_directory(dir.path(), &LocalizeOptions::in_root(dir.path()), &Offline).unwrap();
        assert_eq!(summary.documents(), 0);
        assert_eq!(summary.downloaded(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn unwritable_document_does_not_stop_the_run() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("a.html");
        fs::write(&locked, "<p>a</p>").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o444)).unwrap();
        fs::write(dir.path().join("b.html"), "<p>b</p>").unwrap();

        let summary =
            run_directory(dir.path(), &LocalizeOptions::in_root(dir.path()), &Offline).unwrap();

        // The write-back replaces the file through its directory, so the
        // read-only document may or may not be rewritten; the run must
        // still reach the second one.
        assert_eq!(summary.documents(), 2);
        assert!(summary
            .reports
            .iter()
            .any(|r| r.document == dir.path().join("b.html")));
    }
}
