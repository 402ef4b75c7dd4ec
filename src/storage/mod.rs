//! SQLite persistence: pool setup, schema migrations, the visitor row
//! model, inserts, and the aggregate queries behind the reports.

pub mod insert;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;

// Re-export commonly used items
pub use insert::insert_visitor;
pub use migrations::run_migrations;
pub use models::VisitorRow;
pub use pool::init_db_pool_with_path;
pub use queries::{GeoPoint, GroupField, PlaceField, VisitorSummary};
