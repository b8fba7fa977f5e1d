use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Orbit file types available from ESA, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbitType {
    /// Precise Orbit Ephemerides (best accuracy, ~20 days delay)
    POEORB,
    /// Restituted Orbit Ephemerides (lower accuracy, ~3 hours delay)
    RESORB,
}

impl OrbitType {
    /// Orbit types in the order the resolver tries them
    pub const PREFERENCE: [OrbitType; 2] = [OrbitType::POEORB, OrbitType::RESORB];
}

impl std::fmt::Display for OrbitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrbitType::POEORB => write!(f, "POEORB"),
            OrbitType::RESORB => write!(f, "RESORB"),
        }
    }
}

/// Calendar month used to address a catalog directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(time: DateTime<Utc>) -> Self {
        Self {
            year: time.year(),
            month: time.month(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}

/// Sensor and acquisition window decoded from a Sentinel-1 product name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductIdentifier {
    pub name: String,
    pub sensor_type: String,      // S1A, S1B, ...
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl ProductIdentifier {
    /// Year and month of the acquisition start, which selects the catalog directory
    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.start_time)
    }
}

/// One orbit archive listed in a catalog directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub display_name: String,
    pub valid_start: DateTime<Utc>,
    pub valid_end: DateTime<Utc>,
    pub location: String,
}

impl CatalogEntry {
    /// True when the validity window strictly encloses the product window.
    /// Touching either boundary does not count.
    pub fn contains(&self, product: &ProductIdentifier) -> bool {
        self.valid_start < product.start_time && self.valid_end > product.end_time
    }
}

/// A catalog entry verified to cover a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitSelection {
    pub product: ProductIdentifier,
    pub orbit_type: OrbitType,
    pub entry: CatalogEntry,
}

/// Stage of the retrieval pipeline, reported with I/O failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Download,
    Persist,
    Extract,
    Cleanup,
}

impl std::fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStep::Download => write!(f, "download"),
            PipelineStep::Persist => write!(f, "persist"),
            PipelineStep::Extract => write!(f, "extract"),
            PipelineStep::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// Error types for orbit retrieval
#[derive(Debug, thiserror::Error)]
pub enum OrbitError {
    #[error("Invalid product identifier '{identifier}': {reason}")]
    Parse { identifier: String, reason: String },

    #[error("Catalog fetch error: {0}")]
    Fetch(String),

    #[error("No POEORB or RESORB orbit file covers {product} ({start} - {end})")]
    NotFound {
        product: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("I/O error during {step}: {source}")]
    Io {
        step: PipelineStep,
        #[source]
        source: std::io::Error,
    },
}

impl OrbitError {
    pub fn parse(identifier: &str, reason: impl Into<String>) -> Self {
        OrbitError::Parse {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }

    pub fn io(step: PipelineStep, source: std::io::Error) -> Self {
        OrbitError::Io { step, source }
    }

    /// Only a malformed product name lets a batch carry on with the next product
    pub fn is_recoverable(&self) -> bool {
        matches!(self, OrbitError::Parse { .. })
    }
}

/// Result type for orbit operations
pub type OrbitResult<T> = Result<T, OrbitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(start: (u32, u32), end: (u32, u32)) -> ProductIdentifier {
        ProductIdentifier {
            name: "S1A_TEST".to_string(),
            sensor_type: "S1A".to_string(),
            start_time: Utc.with_ymd_and_hms(2020, 1, 1, start.0, start.1, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2020, 1, 1, end.0, end.1, 0).unwrap(),
        }
    }

    fn entry(start_hour: u32, end_hour: u32) -> CatalogEntry {
        CatalogEntry {
            display_name: "orbit.EOF.zip".to_string(),
            valid_start: Utc.with_ymd_and_hms(2020, 1, 1, start_hour, 0, 0).unwrap(),
            valid_end: Utc.with_ymd_and_hms(2020, 1, 1, end_hour, 0, 0).unwrap(),
            location: "http://localhost/orbit.EOF.zip".to_string(),
        }
    }

    #[test]
    fn test_containment_is_strict() {
        let p = product((6, 0), (7, 0));
        assert!(entry(5, 8).contains(&p));
        assert!(!entry(6, 8).contains(&p), "start boundary must be excluded");
        assert!(!entry(5, 7).contains(&p), "end boundary must be excluded");
        assert!(!entry(7, 8).contains(&p));
    }

    #[test]
    fn test_year_month_display() {
        let p = product((6, 0), (7, 0));
        assert_eq!(p.month().to_string(), "2020/01");
    }

    #[test]
    fn test_only_parse_errors_are_recoverable() {
        assert!(OrbitError::parse("x", "too short").is_recoverable());
        assert!(!OrbitError::Fetch("404".to_string()).is_recoverable());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = OrbitError::io(PipelineStep::Persist, io);
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("persist"));
    }
}
