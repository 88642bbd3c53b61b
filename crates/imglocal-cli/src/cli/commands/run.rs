//! `imglocal run` – localize all documents of a directory.

use anyhow::Result;
use imglocal_core::config::ImglocalConfig;
use imglocal_core::fetch::CurlFetcher;
use imglocal_core::run::{run_directory_with, DocumentEvent};
use std::path::Path;

use super::report::{describe, describe_failure, totals};

pub fn run_localize(dir: &Path, cfg: &ImglocalConfig) -> Result<()> {
    let fetcher = CurlFetcher::new(cfg.fetch_options());
    let options = cfg.localize_options(dir);
    let summary = run_directory_with(dir, &options, &fetcher, |event| match event {
        DocumentEvent::Started(document) => println!("Processing {}", document.display()),
        DocumentEvent::Processed(report) => println!("{}", describe(report)),
        DocumentEvent::Failed(failure) => println!("{}", describe_failure(failure)),
    })?;

    if summary.documents() == 0 {
        println!("No .html files found in {}", dir.display());
        return Ok(());
    }
    println!("{}", totals(&summary));
    Ok(())
}
