//! IP address lookup against the loaded City database.

use super::types::GeoIpResult;
use super::GEOIP_READER;

/// Looks up an IP address in the GeoIP City database.
///
/// Returns `None` if GeoIP is not initialized, the address does not
/// parse, or the database has no data for it. Lookup runs on the real
/// client address, before anonymization truncates it.
pub fn lookup_ip(ip: &str) -> Option<GeoIpResult> {
    let reader = GEOIP_READER.read().ok()?;
    let reader = reader.as_ref()?;

    let ip_addr: std::net::IpAddr = ip.parse().ok()?;

    // maxminddb 0.27 API: lookup() returns a LookupResult; has_data()
    // distinguishes "not in database" from a decodable record.
    let lookup = reader.lookup(ip_addr).ok()?;
    if !lookup.has_data() {
        return None;
    }
    let city: maxminddb::geoip2::City = match lookup.decode() {
        Ok(Some(city)) => city,
        Ok(None) | Err(_) => return None,
    };

    let mut geo = GeoIpResult {
        country_code: city.country.iso_code.map(|s| s.to_string()),
        city: city.city.names.english.map(|s| s.to_string()),
        latitude: city.location.latitude,
        longitude: city.location.longitude,
        ..GeoIpResult::default()
    };

    if let Some(subdivision) = city.subdivisions.first() {
        geo.region = subdivision.names.english.map(|s| s.to_string());
    }

    Some(geo)
}

/// Checks if GeoIP is enabled (database is loaded).
pub fn is_enabled() -> bool {
    GEOIP_READER
        .read()
        .ok()
        .and_then(|reader| reader.as_ref().map(|_| true))
        .unwrap_or(false)
}
