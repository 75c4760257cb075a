//! Data access layer for catalog-web
//!
//! One file per entity; every operation is a free async function over the
//! connection pool. Ids are stored as TEXT and parsed back on read.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

pub use catalog_common::db::init_database;

/// Read a TEXT id column back into a Uuid
pub(crate) fn guid_column(row: &SqliteRow, column: &str) -> Result<Uuid> {
    let value: String = row.try_get(column)?;
    Ok(catalog_common::uuid_utils::parse_stored(&value)?)
}

/// Whether a data-access error is a UNIQUE constraint rejection
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map_or(false, |e| e.is_unique_violation())
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    /// Single-connection in-memory database with the catalog schema
    pub async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        catalog_common::db::create_schema(&pool)
            .await
            .expect("Schema initialization failed");
        pool
    }
}
