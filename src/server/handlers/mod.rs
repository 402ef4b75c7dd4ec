//! HTTP request handlers.

mod consent;
mod health;
mod reports;
mod track;

pub use consent::consent_handler;
pub use health::health_handler;
pub use reports::{
    analytics_handler, browser_stats_handler, browser_versions_handler, cities_handler,
    countries_handler, devices_handler, geo_heatmap_handler, languages_handler, os_stats_handler,
    privacy_stats_handler, referrers_handler, regions_handler, screen_resolutions_handler,
    summary_handler, timeline_handler, top_pages_handler,
};
pub use track::track_handler;
