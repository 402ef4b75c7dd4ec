//! GeoIP data structures.

use serde::Serialize;

/// Geographic attributes resolved for one IP address.
///
/// Every field is optional: the database may carry partial data for an
/// address, and callers treat an empty result the same as no result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeoIpResult {
    /// ISO 3166-1 alpha-2 country code
    pub country_code: Option<String>,
    /// First-level subdivision (state/region), English name
    pub region: Option<String>,
    /// City, English name
    pub city: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
}
