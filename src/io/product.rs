use crate::types::{OrbitError, OrbitResult, ProductIdentifier};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::path::Path;

/// Timestamp layout used in product names, e.g. 20200103T170815
pub const PRODUCT_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Minimum number of `_`-separated fields in a product name
const MIN_PRODUCT_FIELDS: usize = 7;

impl ProductIdentifier {
    /// Parse a product name such as
    /// `S1A_IW_SLC__1SDV_20200103T170815_20200103T170842_030639_0382D5_DADE.SAFE`.
    ///
    /// The first field is the sensor, fields six and seven the acquisition
    /// start and stop times.
    pub fn parse(identifier: &str) -> OrbitResult<Self> {
        let fields: Vec<&str> = identifier.split('_').collect();
        if fields.len() < MIN_PRODUCT_FIELDS {
            return Err(OrbitError::parse(
                identifier,
                format!(
                    "expected at least {} '_' separated fields, found {}",
                    MIN_PRODUCT_FIELDS,
                    fields.len()
                ),
            ));
        }

        let start_time = parse_product_time(identifier, fields[5])?;
        let end_time = parse_product_time(identifier, fields[6])?;

        if start_time >= end_time {
            return Err(OrbitError::parse(
                identifier,
                format!("start time {} is not before end time {}", start_time, end_time),
            ));
        }

        Ok(Self {
            name: identifier.to_string(),
            sensor_type: fields[0].to_string(),
            start_time,
            end_time,
        })
    }
}

impl std::str::FromStr for ProductIdentifier {
    type Err = OrbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_product_time(identifier: &str, field: &str) -> OrbitResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(field, PRODUCT_TIME_FORMAT)
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
        .map_err(|e| OrbitError::parse(identifier, format!("bad timestamp '{}': {}", field, e)))
}

/// List names in `dir` that end with `suffix`, sorted so runs are reproducible
pub fn discover_products<P: AsRef<Path>>(dir: P, suffix: &str) -> std::io::Result<Vec<String>> {
    let dir = dir.as_ref();
    log::debug!("Scanning {} for *{} products", dir.display(), suffix);

    let mut products = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(suffix) {
            products.push(name);
        }
    }
    products.sort();

    log::info!("Found {} product(s) in {}", products.len(), dir.display());
    Ok(products)
}
