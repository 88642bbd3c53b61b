//! `imglocal file <path>` – localize one document.

use anyhow::Result;
use imglocal_core::config::ImglocalConfig;
use imglocal_core::document::process_document;
use imglocal_core::fetch::CurlFetcher;
use std::path::Path;

use super::report::describe;

pub fn run_file(path: &Path, cfg: &ImglocalConfig) -> Result<()> {
    let root = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let fetcher = CurlFetcher::new(cfg.fetch_options());
    let report = process_document(path, &cfg.localize_options(root), &fetcher)?;
    println!("{}", describe(&report));
    Ok(())
}
