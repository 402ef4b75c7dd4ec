//! Database row models.

/// One visitor record as persisted to the `visitors` table.
///
/// `ip_address` is the anonymized form; the full client address is never
/// stored. All telemetry fields are optional since clients send whatever
/// their environment exposes.
#[derive(Debug, Clone, Default)]
pub struct VisitorRow {
    /// Anonymized source IP (last IPv4 octet / trailing IPv6 groups zeroed)
    pub ip_address: String,
    /// Sanitized user agent string
    pub user_agent: Option<String>,
    /// Browser family name
    pub browser_name: Option<String>,
    /// Browser version string
    pub browser_version: Option<String>,
    /// Operating system name
    pub os_name: Option<String>,
    /// Device class: Mobile, Tablet, or Desktop
    pub device_type: Option<String>,
    /// Physical screen width in pixels
    pub screen_width: Option<i64>,
    /// Physical screen height in pixels
    pub screen_height: Option<i64>,
    /// Browser viewport width in pixels
    pub viewport_width: Option<i64>,
    /// Browser viewport height in pixels
    pub viewport_height: Option<i64>,
    /// Minutes offset from UTC as reported by the client
    pub timezone_offset: Option<i64>,
    /// Primary language tag
    pub language: Option<String>,
    /// Referring URL
    pub referrer: Option<String>,
    /// URL of the tracked page view
    pub page_visited: Option<String>,
    /// ISO country code from GeoIP enrichment
    pub country_code: Option<String>,
    /// Region/state name from GeoIP enrichment
    pub region: Option<String>,
    /// City name from GeoIP enrichment
    pub city: Option<String>,
    /// Latitude from GeoIP enrichment
    pub latitude: Option<f64>,
    /// Longitude from GeoIP enrichment
    pub longitude: Option<f64>,
    /// Canvas fingerprint hash
    pub canvas_fingerprint: Option<String>,
    /// Audio fingerprint hash
    pub audio_fingerprint: Option<String>,
    /// WebGL renderer string
    pub webgl_renderer: Option<String>,
    /// Touch capability indicator
    pub touch_support: Option<String>,
    /// Logical CPU count reported by the client
    pub hardware_concurrency: Option<i64>,
    /// Display color depth in bits
    pub color_depth: Option<i64>,
    /// IANA timezone name
    pub timezone: Option<String>,
    /// Full language preference string
    pub user_language: Option<String>,
    /// Client platform identifier
    pub platform: Option<String>,
    /// Consent flag at the time the record was accepted
    pub consent_granted: bool,
    /// Insertion time, milliseconds since the Unix epoch
    pub created_at: i64,
}
