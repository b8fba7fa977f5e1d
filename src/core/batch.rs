use crate::core::pipeline::RetrievalPipeline;
use crate::core::resolver::OrbitResolver;
use crate::io::catalog::OrbitCatalog;
use crate::io::transport::Fetcher;
use crate::types::{OrbitResult, ProductIdentifier};
use std::path::PathBuf;

/// Outcome of a batch run that did not abort
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Orbit archives downloaded and unpacked, one per product
    pub fetched: Vec<String>,
    /// Products skipped because their names could not be parsed
    pub skipped: Vec<String>,
}

/// Processes products one after another: parse, resolve, download and unpack
pub struct BatchRunner<C, F> {
    resolver: OrbitResolver<C>,
    pipeline: RetrievalPipeline<F>,
    dest_dir: PathBuf,
}

impl<C: OrbitCatalog, F: Fetcher> BatchRunner<C, F> {
    pub fn new(
        resolver: OrbitResolver<C>,
        pipeline: RetrievalPipeline<F>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resolver,
            pipeline,
            dest_dir: dest_dir.into(),
        }
    }

    /// Run every product in input order.
    ///
    /// Unparseable names are logged and skipped. Any other error stops the
    /// batch and is returned; products after it are not attempted.
    pub fn run<I, S>(&self, identifiers: I) -> OrbitResult<BatchReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = BatchReport::default();

        for identifier in identifiers {
            let identifier = identifier.as_ref();
            log::info!("Processing {}", identifier);

            match self.process(identifier) {
                Ok(archive) => report.fetched.push(archive),
                Err(e) if e.is_recoverable() => {
                    log::warn!("Skipping {}: {}", identifier, e);
                    report.skipped.push(identifier.to_string());
                }
                Err(e) => {
                    log::error!("Aborting batch at {}: {}", identifier, e);
                    return Err(e);
                }
            }
        }

        log::info!(
            "Batch finished: {} fetched, {} skipped",
            report.fetched.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    fn process(&self, identifier: &str) -> OrbitResult<String> {
        let product = ProductIdentifier::parse(identifier)?;
        let selection = self.resolver.resolve(&product)?;
        self.pipeline.execute(&selection, &self.dest_dir)?;
        Ok(selection.entry.display_name)
    }
}
