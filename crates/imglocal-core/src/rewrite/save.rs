//! Fetch one remote image and write it under its sequence name.

use std::path::Path;

use super::{SavedImage, SkippedReference};
use crate::fetch::Fetcher;
use crate::storage;
use crate::url_model::resolve_extension;

/// Downloads images for one document into its images directory.
pub struct ImageSaver<'a, F: ?Sized> {
    fetcher: &'a F,
    images_dir: &'a Path,
    stem: &'a str,
}

impl<'a, F> ImageSaver<'a, F>
where
    F: Fetcher + ?Sized,
{
    pub fn new(fetcher: &'a F, images_dir: &'a Path, stem: &'a str) -> Self {
        Self {
            fetcher,
            images_dir,
            stem,
        }
    }

    /// Fetches `url` and writes it as `<stem>-<sequence><ext>`.
    ///
    /// Failures are logged and returned as a [`SkippedReference`]; nothing
    /// is left on disk under the final name.
    pub fn save(&self, url: &str, sequence: u32) -> Result<SavedImage, SkippedReference> {
        let image = self.fetcher.fetch(url).map_err(|e| {
            let reason = e.reason();
            tracing::warn!("could not download {}: {}", url, reason);
            skipped(url, reason)
        })?;

        let ext = resolve_extension(url, image.content_type.as_deref());
        let file_name = format!("{}-{}{}", self.stem, sequence, ext);
        let path = storage::write_image(self.images_dir, &file_name, &image.bytes).map_err(|e| {
            tracing::warn!("could not save image from {}: {:#}", url, e);
            skipped(url, format!("{:#}", e))
        })?;

        let local_ref = match self.images_dir.file_name() {
            Some(dir_name) => format!("{}/{}", dir_name.to_string_lossy(), file_name),
            None => file_name,
        };
        tracing::info!(
            "saved {} ({} bytes) as {}",
            url,
            image.bytes.len(),
            path.display()
        );
        Ok(SavedImage {
            url: url.to_string(),
            sequence,
            path,
            local_ref,
        })
    }
}

fn skipped(url: &str, reason: String) -> SkippedReference {
    SkippedReference {
        url: url.to_string(),
        reason,
    }
}
