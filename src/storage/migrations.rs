//! Schema migration management.
//!
//! Migrations are plain SQL files under `migrations/`, applied by the
//! sqlx migrator at startup before the collector accepts its first
//! record. The `visitors` table and its indexes live there.

use sqlx::{Pool, Sqlite};

/// Applies any pending migrations from the `migrations/` directory.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), anyhow::Error> {
    let migrations_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir.as_path()).await?;
    migrator.run(pool).await?;
    Ok(())
}
