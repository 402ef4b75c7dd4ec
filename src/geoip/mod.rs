//! GeoIP enrichment using a MaxMind GeoLite2 City database.
//!
//! The database is loaded once at startup from an operator-supplied file
//! path and held in a global reader. Enrichment is optional: when no
//! database is configured, lookups return `None` and records are stored
//! without geographic attributes.

mod lookup;
mod types;

pub use lookup::{is_enabled, lookup_ip};
pub use types::GeoIpResult;

use std::path::Path;
use std::sync::{Arc, LazyLock, RwLock};

use maxminddb::Reader;

use crate::error_handling::InitializationError;

/// Global GeoIP City reader (loaded at startup, read-only afterwards)
static GEOIP_READER: LazyLock<Arc<RwLock<Option<Arc<Reader<Vec<u8>>>>>>> =
    LazyLock::new(|| Arc::new(RwLock::new(None)));

/// Loads the GeoLite2 City database from a file and installs it as the
/// global reader.
///
/// # Arguments
///
/// * `path` - Filesystem path to a `.mmdb` file
pub fn init_geoip(path: &Path) -> Result<(), InitializationError> {
    let reader = Reader::open_readfile(path).map_err(|e| {
        InitializationError::GeoIpError(format!(
            "Failed to load GeoIP database from {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut guard = GEOIP_READER
        .write()
        .map_err(|_| InitializationError::GeoIpError("GeoIP reader lock poisoned".to_string()))?;
    *guard = Some(Arc::new(reader));

    log::info!("GeoIP database loaded from {}", path.display());
    Ok(())
}
