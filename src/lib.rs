//! orbit-fetch: Sentinel-1 orbit file retrieval
//!
//! Finds the POEORB (or, failing that, RESORB) orbit archive whose validity
//! window covers a Sentinel-1 product, downloads it from the ESA STEP server
//! and unpacks it next to the product.

pub mod types;
pub mod config;
pub mod io;
pub mod core;

// Re-export main types and functions for easier access
pub use types::{
    CatalogEntry, OrbitError, OrbitResult, OrbitSelection, OrbitType, PipelineStep,
    ProductIdentifier, YearMonth,
};
pub use config::FetchConfig;
pub use crate::io::{discover_products, extract_archive, Fetcher, HttpFetcher, OrbitCatalog, StepCatalog};
pub use crate::core::{BatchReport, BatchRunner, OrbitResolver, RetrievalPipeline};

/// Wire the HTTP-backed catalog, resolver and pipeline described by `config`
pub fn http_batch_runner(
    config: &FetchConfig,
) -> OrbitResult<BatchRunner<StepCatalog<HttpFetcher>, HttpFetcher>> {
    let fetcher = HttpFetcher::new(config)?;
    let catalog = StepCatalog::new(config.catalog_root(), fetcher.clone());
    let pipeline = RetrievalPipeline::new(fetcher, config.work_dir.clone());

    Ok(BatchRunner::new(
        OrbitResolver::new(catalog),
        pipeline,
        config.dest_dir.clone(),
    ))
}
