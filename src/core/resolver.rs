use crate::io::catalog::OrbitCatalog;
use crate::types::{CatalogEntry, OrbitError, OrbitResult, OrbitSelection, OrbitType, ProductIdentifier};

/// Picks the orbit archive covering a product, preferring POEORB over RESORB
pub struct OrbitResolver<C> {
    catalog: C,
}

impl<C: OrbitCatalog> OrbitResolver<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Resolve the orbit file for a product.
    ///
    /// The POEORB directory for the acquisition month is searched first and the
    /// RESORB directory only if nothing there covers the product. Catalog
    /// errors abort immediately without trying the next orbit type.
    pub fn resolve(&self, product: &ProductIdentifier) -> OrbitResult<OrbitSelection> {
        let month = product.month();

        for orbit_type in OrbitType::PREFERENCE {
            let entries = self.catalog.list(orbit_type, &product.sensor_type, month)?;

            if let Some(entry) = select_containing(entries, product) {
                log::info!(
                    "Selected {} orbit {} (valid {} - {})",
                    orbit_type,
                    entry.display_name,
                    entry.valid_start,
                    entry.valid_end
                );
                return Ok(OrbitSelection {
                    product: product.clone(),
                    orbit_type,
                    entry,
                });
            }

            log::warn!("No {} orbit covers {}", orbit_type, product.name);
        }

        Err(OrbitError::NotFound {
            product: product.name.clone(),
            start: product.start_time,
            end: product.end_time,
        })
    }
}

/// First entry in listing order whose validity strictly encloses the product window
pub fn select_containing(
    entries: Vec<CatalogEntry>,
    product: &ProductIdentifier,
) -> Option<CatalogEntry> {
    entries.into_iter().find(|entry| entry.contains(product))
}
