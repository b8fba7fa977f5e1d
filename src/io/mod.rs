//! I/O modules for product names, orbit catalogs, HTTP transport and archives

pub mod product;
pub mod transport;
pub mod catalog;
pub mod archive;

pub use product::discover_products;
pub use transport::{Fetcher, HttpFetcher};
pub use catalog::{OrbitCatalog, StepCatalog};
pub use archive::extract_archive;
