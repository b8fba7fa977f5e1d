use crate::io::archive::extract_archive;
use crate::io::transport::Fetcher;
use crate::types::{OrbitError, OrbitResult, OrbitSelection, PipelineStep};
use std::path::{Path, PathBuf};

/// Downloads a selected orbit archive, unpacks it and removes the archive
pub struct RetrievalPipeline<F> {
    fetcher: F,
    work_dir: PathBuf,
}

impl<F: Fetcher> RetrievalPipeline<F> {
    /// `work_dir` receives the downloaded archive before extraction
    pub fn new(fetcher: F, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            work_dir: work_dir.into(),
        }
    }

    /// Run download, persist, extract and cleanup for one selection.
    ///
    /// Returns the files extracted under `dest_dir`. A failed step is reported
    /// as `OrbitError::Io` naming the step; nothing already written is rolled back.
    pub fn execute<P: AsRef<Path>>(
        &self,
        selection: &OrbitSelection,
        dest_dir: P,
    ) -> OrbitResult<Vec<PathBuf>> {
        let entry = &selection.entry;
        log::info!("Downloading {} orbit file: {}", selection.orbit_type, entry.location);

        let bytes = self.fetcher.fetch(&entry.location).map_err(|e| {
            OrbitError::io(
                PipelineStep::Download,
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
            )
        })?;

        let archive_path = self.work_dir.join(&entry.display_name);
        std::fs::write(&archive_path, &bytes)
            .map_err(|e| OrbitError::io(PipelineStep::Persist, e))?;
        log::debug!("Saved {} bytes to {}", bytes.len(), archive_path.display());

        let extracted = match extract_archive(&archive_path, dest_dir.as_ref()) {
            Ok(extracted) => extracted,
            Err(e) => {
                if let Err(cleanup) = std::fs::remove_file(&archive_path) {
                    log::warn!("Failed to remove {}: {}", archive_path.display(), cleanup);
                }
                return Err(OrbitError::io(PipelineStep::Extract, e));
            }
        };

        std::fs::remove_file(&archive_path)
            .map_err(|e| OrbitError::io(PipelineStep::Cleanup, e))?;
        log::debug!("Removed {}", archive_path.display());

        log::info!(
            "Orbit file for {} unpacked ({} file(s))",
            selection.product.name,
            extracted.len()
        );
        Ok(extracted)
    }
}
