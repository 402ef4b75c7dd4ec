//! Error handling.
//!
//! Error taxonomy for the service:
//! - **Validation failures** are structured data, recovered locally and
//!   returned to the caller in full (see `validation::ValidationResult`).
//! - **External dependency failures** (database, geo lookup) are logged
//!   with context and converted to a generic failure at the orchestration
//!   layer; internal detail never reaches the HTTP response.
//! - **Threat assessment never raises** -- absent or malformed input
//!   degrades to a neutral score.

mod types;

// Re-export public API
pub use types::{DatabaseError, IngestError, InitializationError};
