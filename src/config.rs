//! Runtime configuration for orbit retrieval

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ESA STEP auxiliary data server hosting the Sentinel-1 orbit catalogs
pub const DEFAULT_BASE_URL: &str = "http://step.esa.int/auxdata/orbits/Sentinel-1";

/// Directory suffix of unpacked Sentinel-1 products
pub const DEFAULT_PRODUCT_SUFFIX: &str = ".SAFE";

/// Settings shared by the catalog client, the retrieval pipeline and the batch driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Catalog root, without trailing slash
    pub base_url: String,
    /// Names ending with this suffix are treated as products
    pub product_suffix: String,
    /// Where products are discovered and downloaded archives are written
    pub work_dir: PathBuf,
    /// Extraction target; empty means the current directory
    pub dest_dir: PathBuf,
    /// HTTP timeout in seconds, `None` keeps the client default
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            product_suffix: DEFAULT_PRODUCT_SUFFIX.to_string(),
            work_dir: PathBuf::from("."),
            dest_dir: PathBuf::new(),
            timeout_secs: None,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FetchConfig {
    /// Base URL with any trailing slashes removed
    pub fn catalog_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.catalog_root(), DEFAULT_BASE_URL);
        assert_eq!(config.product_suffix, ".SAFE");
        assert!(config.dest_dir.as_os_str().is_empty());
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_catalog_root_strips_trailing_slash() {
        let config = FetchConfig {
            base_url: "http://localhost:8080/orbits/".to_string(),
            ..FetchConfig::default()
        };
        assert_eq!(config.catalog_root(), "http://localhost:8080/orbits");
    }
}
