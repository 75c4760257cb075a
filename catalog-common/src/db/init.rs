//! Database initialization
//!
//! Creates the database file on first run and the catalog tables
//! idempotently on every start.
//!
//! Columns that name another entity are declared as references, but deletes
//! never cascade: a parent with dependents is kept by the controllers'
//! dependent-record guard before any DELETE is issued.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Open (creating if needed) the catalog database and ensure the schema
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets the paired lookups of a detail page read concurrently
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all catalog tables (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(pool)
        .await?;

    create_schema_version_table(pool).await?;
    create_authors_table(pool).await?;
    create_genres_table(pool).await?;
    create_books_table(pool).await?;
    create_book_genres_table(pool).await?;
    create_book_instances_table(pool).await?;

    sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (?)")
        .bind(SCHEMA_VERSION)
        .execute(pool)
        .await?;

    Ok(())
}

/// Current schema version
pub const SCHEMA_VERSION: i64 = 1;

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_authors_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            guid TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            family_name TEXT NOT NULL,
            date_of_birth TEXT,
            date_of_death TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_authors_family_name ON authors(family_name)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_genres_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            name_key TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // name_key holds the lowercased name; two genres may not share it
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_genres_name_key ON genres(name_key)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_books_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            author_id TEXT NOT NULL REFERENCES authors(guid),
            summary TEXT NOT NULL,
            isbn TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_author ON books(author_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_book_genres_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book_genres (
            book_id TEXT NOT NULL REFERENCES books(guid),
            genre_id TEXT NOT NULL REFERENCES genres(guid),
            PRIMARY KEY (book_id, genre_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_book_genres_genre ON book_genres(genre_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_book_instances_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book_instances (
            guid TEXT PRIMARY KEY,
            book_id TEXT NOT NULL REFERENCES books(guid),
            imprint TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'Maintenance'
                CHECK (status IN ('Available', 'Maintenance', 'Loaned', 'Reserved')),
            due_back TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_book_instances_book ON book_instances(book_id)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database")
    }

    #[tokio::test]
    async fn test_create_schema_is_idempotent() {
        let pool = memory_pool().await;

        create_schema(&pool).await.expect("first run");
        create_schema(&pool).await.expect("second run");

        let versions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[tokio::test]
    async fn test_all_tables_created() {
        let pool = memory_pool().await;
        create_schema(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(
            tables,
            vec!["authors", "book_genres", "book_instances", "books", "genres", "schema_version"]
        );
    }

    #[tokio::test]
    async fn test_instance_status_is_constrained() {
        let pool = memory_pool().await;
        create_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO authors (guid, first_name, family_name) VALUES ('a', 'Jo', 'Doe')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO books (guid, title, author_id, summary, isbn) VALUES ('b', 'T', 'a', 'S', 'I')")
            .execute(&pool)
            .await
            .unwrap();

        let bad = sqlx::query(
            "INSERT INTO book_instances (guid, book_id, imprint, status, due_back) VALUES ('i', 'b', 'x', 'Lost', '2020-01-01')",
        )
        .execute(&pool)
        .await;
        assert!(bad.is_err(), "Unknown status must be rejected");
    }

    #[tokio::test]
    async fn test_genre_name_key_is_unique() {
        let pool = memory_pool().await;
        create_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO genres (guid, name, name_key) VALUES ('g1', 'Épopée', 'épopée')")
            .execute(&pool)
            .await
            .unwrap();
        let dup = sqlx::query("INSERT INTO genres (guid, name, name_key) VALUES ('g2', 'épopée', 'épopée')")
            .execute(&pool)
            .await;
        assert!(dup.is_err(), "Second genre with the same key must be rejected");
    }
}
