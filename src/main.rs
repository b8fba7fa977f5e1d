use anyhow::Context;
use clap::Parser;
use orbit_fetch::{discover_products, http_batch_runner, FetchConfig};
use std::path::PathBuf;

/// Download and unpack the orbit file covering each Sentinel-1 product
#[derive(Parser, Debug)]
#[command(name = "orbit-fetch", version, about)]
struct Cli {
    /// Product names to process; defaults to every *.SAFE entry in the work directory
    products: Vec<String>,

    /// Root of the orbit catalog
    #[arg(long, env = "ORBIT_FETCH_BASE_URL", default_value = orbit_fetch::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Suffix marking product entries during discovery
    #[arg(long, env = "ORBIT_FETCH_SUFFIX", default_value = orbit_fetch::config::DEFAULT_PRODUCT_SUFFIX)]
    suffix: String,

    /// Directory scanned for products and used for downloaded archives
    #[arg(long, env = "ORBIT_FETCH_WORK_DIR", default_value = ".")]
    work_dir: PathBuf,

    /// Extraction directory (the work directory when omitted)
    #[arg(long, env = "ORBIT_FETCH_DEST_DIR")]
    dest_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, env = "ORBIT_FETCH_TIMEOUT")]
    timeout: Option<u64>,
}

impl Cli {
    fn into_config(self) -> (FetchConfig, Vec<String>) {
        let dest_dir = self.dest_dir.unwrap_or_else(|| self.work_dir.clone());
        let config = FetchConfig {
            base_url: self.base_url,
            product_suffix: self.suffix,
            work_dir: self.work_dir,
            dest_dir,
            timeout_secs: self.timeout,
            ..FetchConfig::default()
        };
        (config, self.products)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, products) = Cli::parse().into_config();

    let products = if products.is_empty() {
        discover_products(&config.work_dir, &config.product_suffix).with_context(|| {
            format!("Failed to scan {} for products", config.work_dir.display())
        })?
    } else {
        products
    };

    let runner = http_batch_runner(&config)?;
    let report = runner.run(&products)?;

    log::info!(
        "{} orbit file(s) retrieved, {} product(s) skipped",
        report.fetched.len(),
        report.skipped.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dest_dir_defaults_to_work_dir() {
        let (config, products) = Cli::parse_from(["orbit-fetch", "--work-dir", "/data"]).into_config();
        assert_eq!(config.work_dir, PathBuf::from("/data"));
        assert_eq!(config.dest_dir, PathBuf::from("/data"));
        assert!(products.is_empty());
    }

    #[test]
    fn test_explicit_dest_dir_and_products() {
        let (config, products) = Cli::parse_from([
            "orbit-fetch",
            "--dest-dir",
            "/orbits",
            "S1A_IW_SLC__1SDV_20200101T060000_20200101T063000_x.SAFE",
        ])
        .into_config();
        assert_eq!(config.work_dir, PathBuf::from("."));
        assert_eq!(config.dest_dir, PathBuf::from("/orbits"));
        assert_eq!(products.len(), 1);
    }
}
