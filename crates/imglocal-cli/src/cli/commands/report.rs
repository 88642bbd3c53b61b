//! Console lines for document reports.

use imglocal_core::document::{DocumentReport, StylesOutcome};
use imglocal_core::run::{DocumentFailure, RunSummary};

/// One line per document: what was downloaded and what else changed,
/// followed by one indented line per reference left remote.
pub fn describe(report: &DocumentReport) -> String {
    let name = report
        .document
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.document.display().to_string());

    let mut parts = Vec::new();
    match report.downloaded() {
        0 => {}
        1 => parts.push("1 image downloaded".to_string()),
        n => parts.push(format!("{} images downloaded", n)),
    }
    if !report.skipped.is_empty() {
        parts.push(format!("{} left remote", report.skipped.len()));
    }
    match report.styles {
        StylesOutcome::Injected => parts.push("slide styles added".to_string()),
        StylesOutcome::MissingHead => parts.push("no </head>, slide styles skipped".to_string()),
        StylesOutcome::NotApplicable | StylesOutcome::AlreadyPresent => {}
    }
    if report.backup.is_none() {
        parts.push("no backup".to_string());
    }

    let mut out = if parts.is_empty() {
        format!("{}: no remote images", name)
    } else {
        format!("{}: {}", name, parts.join(", "))
    };
    for skipped in &report.skipped {
        out.push_str(&format!("\n  skipped {}: {}", skipped.url, skipped.reason));
    }
    out
}

pub fn describe_failure(failure: &DocumentFailure) -> String {
    format!("{}: failed: {}", failure.document.display(), failure.error)
}

pub fn totals(summary: &RunSummary) -> String {
    let mut line = format!(
        "{} documents, {} images downloaded",
        summary.documents(),
        summary.downloaded()
    );
    if !summary.failures.is_empty() {
        line.push_str(&format!(", {} failed", summary.failures.len()));
    }
    line
}
