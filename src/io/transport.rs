use crate::config::FetchConfig;
use crate::types::{OrbitError, OrbitResult};

/// Reads the full body behind a URL.
///
/// The catalog client and the retrieval pipeline only see this trait, so tests
/// can serve listings and archives from memory.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> OrbitResult<Vec<u8>>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str) -> OrbitResult<Vec<u8>> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> OrbitResult<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| OrbitError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> OrbitResult<Vec<u8>> {
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| OrbitError::Fetch(format!("HTTP request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(OrbitError::Fetch(format!(
                "HTTP request to {} failed with status: {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| OrbitError::Fetch(format!("Failed to read response bytes: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
