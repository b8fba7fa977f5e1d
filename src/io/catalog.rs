use crate::io::transport::Fetcher;
use crate::types::{CatalogEntry, OrbitError, OrbitResult, OrbitType, YearMonth};
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

/// Link text of the row pointing back up the directory tree
const PARENT_DIRECTORY: &str = "Parent Directory";

/// Validity start field, e.g. V20200101T225942
const VALIDITY_START_FORMAT: &str = "V%Y%m%dT%H%M%S";

/// Validity end field including the archive suffix, e.g. 20200103T005942.EOF.zip
const VALIDITY_END_FORMAT: &str = "%Y%m%dT%H%M%S.EOF.zip";

/// Source of orbit archive listings, one directory per orbit type, sensor and month
pub trait OrbitCatalog {
    /// List every archive in the directory, in listing order
    fn list(
        &self,
        orbit_type: OrbitType,
        sensor_type: &str,
        month: YearMonth,
    ) -> OrbitResult<Vec<CatalogEntry>>;
}

/// Catalog backed by the HTML directory listings of the ESA STEP server
pub struct StepCatalog<F> {
    base_url: String,
    fetcher: F,
}

impl<F: Fetcher> StepCatalog<F> {
    pub fn new(base_url: impl Into<String>, fetcher: F) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, fetcher }
    }

    /// Directory URL: `<base>/<type>/<sensor>/<YYYY>/<MM>/`
    pub fn directory_url(&self, orbit_type: OrbitType, sensor_type: &str, month: YearMonth) -> String {
        format!("{}/{}/{}/{}/", self.base_url, orbit_type, sensor_type, month)
    }
}

impl<F: Fetcher> OrbitCatalog for StepCatalog<F> {
    fn list(
        &self,
        orbit_type: OrbitType,
        sensor_type: &str,
        month: YearMonth,
    ) -> OrbitResult<Vec<CatalogEntry>> {
        let dir_url = self.directory_url(orbit_type, sensor_type, month);
        log::info!("Querying {} catalog: {}", orbit_type, dir_url);

        let body = self.fetcher.fetch(&dir_url)?;
        let html = String::from_utf8_lossy(&body);

        let entries = parse_listing(&html, &dir_url)?;
        log::debug!("{} entries listed in {}", entries.len(), dir_url);
        Ok(entries)
    }
}

/// Parse an HTML directory listing into catalog entries.
///
/// Every table cell holding a link other than the parent directory must be an
/// orbit archive name; one malformed row rejects the whole listing.
pub fn parse_listing(html: &str, dir_url: &str) -> OrbitResult<Vec<CatalogEntry>> {
    let cell_pattern = Regex::new(r"(?is)<td[^>]*>(.*?)</td>")
        .map_err(|e| OrbitError::Fetch(format!("Regex error: {}", e)))?;
    let anchor_pattern = Regex::new(r"(?is)<a\b[^>]*>(.*?)</a>")
        .map_err(|e| OrbitError::Fetch(format!("Regex error: {}", e)))?;
    let tag_pattern = Regex::new(r"(?s)<[^>]*>")
        .map_err(|e| OrbitError::Fetch(format!("Regex error: {}", e)))?;

    let mut entries = Vec::new();

    for cell in cell_pattern.captures_iter(html) {
        let Some(cell_html) = cell.get(1) else { continue };

        // Text of every link in the cell, nested markup removed
        let mut title = String::new();
        for anchor in anchor_pattern.captures_iter(cell_html.as_str()) {
            if let Some(inner) = anchor.get(1) {
                title.push_str(&tag_pattern.replace_all(inner.as_str(), ""));
            }
        }
        let title = decode_entities(&title);
        let title = title.trim();

        if title.is_empty() || title == PARENT_DIRECTORY {
            continue;
        }

        entries.push(parse_entry(title, dir_url)?);
    }

    Ok(entries)
}

/// Build an entry from an archive name such as
/// `S1A_OPER_AUX_POEORB_OPOD_20200121T120654_V20200101T225942_20200103T005942.EOF.zip`
fn parse_entry(title: &str, dir_url: &str) -> OrbitResult<CatalogEntry> {
    // The name becomes a local file name, so it must stay a single path component
    if title.contains('/') || title.contains('\\') || title.contains("..") {
        return Err(OrbitError::Fetch(format!(
            "Malformed catalog entry '{}': name must not contain path separators or '..'",
            title
        )));
    }

    let fields: Vec<&str> = title.split('_').collect();
    if fields.len() < 8 {
        return Err(OrbitError::Fetch(format!(
            "Malformed catalog entry '{}': expected at least 8 fields, found {}",
            title,
            fields.len()
        )));
    }

    let valid_start = parse_validity_time(title, fields[6], VALIDITY_START_FORMAT)?;
    let valid_end = parse_validity_time(title, fields[7], VALIDITY_END_FORMAT)?;

    Ok(CatalogEntry {
        display_name: title.to_string(),
        valid_start,
        valid_end,
        location: format!("{}{}", dir_url, title),
    })
}

/// Replace the character references Apache-style listings emit
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn parse_validity_time(title: &str, field: &str, format: &str) -> OrbitResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(field, format)
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
        .map_err(|e| {
            OrbitError::Fetch(format!(
                "Malformed catalog entry '{}': bad validity time '{}': {}",
                title, field, e
            ))
        })
}
