//! Genre database operations

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use catalog_common::models::genre::name_key;
use catalog_common::models::Genre;

use super::guid_column;

fn genre_from_row(row: &SqliteRow) -> Result<Genre> {
    Ok(Genre {
        id: guid_column(row, "guid")?,
        name: row.try_get("name")?,
    })
}

/// All genres, sorted by name ascending
pub async fn list_genres(pool: &SqlitePool) -> Result<Vec<Genre>> {
    let rows = sqlx::query("SELECT guid, name FROM genres ORDER BY name ASC")
        .fetch_all(pool)
        .await?;

    rows.iter().map(genre_from_row).collect()
}

pub async fn find_genre(pool: &SqlitePool, id: Uuid) -> Result<Option<Genre>> {
    let row = sqlx::query("SELECT guid, name FROM genres WHERE guid = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(genre_from_row).transpose()
}

/// Lookup by name, ignoring case (matched on the stored `name_key`)
pub async fn find_genre_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Genre>> {
    let row = sqlx::query("SELECT guid, name FROM genres WHERE name_key = ?")
        .bind(name_key(name))
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(genre_from_row).transpose()
}

/// Genres attached to a book, sorted by name
pub async fn genres_for_book(pool: &SqlitePool, book_id: Uuid) -> Result<Vec<Genre>> {
    let rows = sqlx::query(
        r#"
        SELECT g.guid, g.name
        FROM genres g
        JOIN book_genres bg ON bg.genre_id = g.guid
        WHERE bg.book_id = ?
        ORDER BY g.name ASC
        "#,
    )
    .bind(book_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(genre_from_row).collect()
}

/// Fails with a unique violation (see [`super::is_unique_violation`]) when
/// another genre already has the name
pub async fn insert_genre(pool: &SqlitePool, genre: &Genre) -> Result<()> {
    sqlx::query("INSERT INTO genres (guid, name, name_key) VALUES (?, ?, ?)")
        .bind(genre.id.to_string())
        .bind(&genre.name)
        .bind(genre.name_key())
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_genre(pool: &SqlitePool, genre: &Genre) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE genres SET name = ?, name_key = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(&genre.name)
    .bind(genre.name_key())
    .bind(genre.id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove the genre row. Callers check for dependent books first.
pub async fn delete_genre(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM genres WHERE guid = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_genres(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM genres")
        .fetch_one(pool)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::is_unique_violation;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let pool = memory_pool().await;
        for name in ["Poetry", "Fantasy", "Military History"] {
            insert_genre(&pool, &Genre::new(name.into())).await.unwrap();
        }

        let names: Vec<String> = list_genres(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Fantasy", "Military History", "Poetry"]);
    }

    #[tokio::test]
    async fn test_find_by_name_ignores_case() {
        let pool = memory_pool().await;
        let genre = Genre::new("Science Fiction".into());
        insert_genre(&pool, &genre).await.unwrap();

        let found = find_genre_by_name(&pool, "science fiction").await.unwrap();
        assert_eq!(found, Some(genre));
        assert!(find_genre_by_name(&pool, "Science").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_name_folds_non_ascii() {
        let pool = memory_pool().await;
        let genre = Genre::new("Épopée".into());
        insert_genre(&pool, &genre).await.unwrap();

        let found = find_genre_by_name(&pool, "épopée").await.unwrap();
        assert_eq!(found, Some(genre));
    }

    #[tokio::test]
    async fn test_duplicate_name_is_unique_violation() {
        let pool = memory_pool().await;
        insert_genre(&pool, &Genre::new("Épopée".into())).await.unwrap();

        let err = insert_genre(&pool, &Genre::new("ÉPOPÉE".into())).await.unwrap_err();
        assert!(is_unique_violation(&err));
        assert_eq!(count_genres(&pool).await.unwrap(), 1);

        let mut other = Genre::new("Poetry".into());
        insert_genre(&pool, &other).await.unwrap();
        other.name = "épopée".into();
        let err = update_genre(&pool, &other).await.unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = memory_pool().await;
        let mut genre = Genre::new("Fantsy".into());
        insert_genre(&pool, &genre).await.unwrap();

        genre.name = "Fantasy".into();
        assert!(update_genre(&pool, &genre).await.unwrap());
        assert_eq!(find_genre(&pool, genre.id).await.unwrap().unwrap().name, "Fantasy");

        assert!(delete_genre(&pool, genre.id).await.unwrap());
        assert_eq!(count_genres(&pool).await.unwrap(), 0);
    }
}
