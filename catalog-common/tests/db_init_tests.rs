//! Integration tests for on-disk database initialization

use catalog_common::db::init::init_database;
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("catalog.db");

    assert!(!db_path.exists());

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("catalog.db");

    let pool1 = init_database(&db_path).await.expect("first open");
    sqlx::query("INSERT INTO genres (guid, name, name_key) VALUES ('g1', 'Poetry', 'poetry')")
        .execute(&pool1)
        .await
        .unwrap();
    pool1.close().await;

    // Data survives a reopen and schema creation does not clobber it
    let pool2 = init_database(&db_path).await.expect("second open");
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
        .fetch_one(&pool2)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
