//! visitor_pulse library: privacy-aware visitor analytics collection.
//!
//! This library implements a web analytics collector: it validates and
//! sanitizes browser telemetry, scores each request against threat
//! heuristics, enriches records with GeoIP geography, anonymizes source
//! addresses before persistence, and serves aggregate reports over HTTP.
//!
//! # Example
//!
//! ```no_run
//! use visitor_pulse::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     port: 3000,
//!     ..Default::default()
//! };
//!
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an
//! async context.

#![warn(missing_docs)]

pub mod config;
pub mod error_handling;
pub mod geoip;
pub mod ingest;
pub mod initialization;
pub mod privacy;
pub mod server;
pub mod storage;
pub mod threat;
pub mod validation;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use run::run_server;
pub use storage::run_migrations;

// Internal run module (startup wiring)
mod run {
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use log::warn;

    use crate::config::Config;
    use crate::geoip::init_geoip;
    use crate::privacy::ConsentState;
    use crate::server::{start_server, AppState};
    use crate::storage::{init_db_pool_with_path, run_migrations};

    /// Initializes storage and GeoIP, then serves until shutdown.
    ///
    /// A missing or unreadable GeoIP database degrades to running
    /// without enrichment rather than refusing to start.
    pub async fn run_server(config: Config) -> Result<()> {
        let pool = init_db_pool_with_path(&config.db_path)
            .await
            .context("Failed to initialize database pool")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        match &config.geoip {
            Some(path) => {
                if let Err(e) = init_geoip(path) {
                    warn!("{}. Continuing without GeoIP enrichment.", e);
                }
            }
            None => {
                log::info!("No GeoIP database configured; geographic enrichment disabled");
            }
        }

        let state = AppState::new(pool, Arc::new(ConsentState::new()));
        start_server(config.port, state).await
    }
}
