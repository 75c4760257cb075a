//! Author database operations

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use catalog_common::models::Author;

use super::guid_column;

fn author_from_row(row: &SqliteRow) -> Result<Author> {
    Ok(Author {
        id: guid_column(row, "guid")?,
        first_name: row.try_get("first_name")?,
        family_name: row.try_get("family_name")?,
        date_of_birth: row.try_get("date_of_birth")?,
        date_of_death: row.try_get("date_of_death")?,
    })
}

/// All authors, sorted by family name ascending
pub async fn list_authors(pool: &SqlitePool) -> Result<Vec<Author>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, first_name, family_name, date_of_birth, date_of_death
        FROM authors
        ORDER BY family_name ASC, first_name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(author_from_row).collect()
}

pub async fn find_author(pool: &SqlitePool, id: Uuid) -> Result<Option<Author>> {
    let row = sqlx::query(
        r#"
        SELECT guid, first_name, family_name, date_of_birth, date_of_death
        FROM authors
        WHERE guid = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(author_from_row).transpose()
}

pub async fn insert_author(pool: &SqlitePool, author: &Author) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO authors (guid, first_name, family_name, date_of_birth, date_of_death)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(author.id.to_string())
    .bind(&author.first_name)
    .bind(&author.family_name)
    .bind(author.date_of_birth)
    .bind(author.date_of_death)
    .execute(pool)
    .await?;

    Ok(())
}

/// Replace every stored field of the author; false when no such author
pub async fn update_author(pool: &SqlitePool, author: &Author) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE authors
        SET first_name = ?, family_name = ?, date_of_birth = ?, date_of_death = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&author.first_name)
    .bind(&author.family_name)
    .bind(author.date_of_birth)
    .bind(author.date_of_death)
    .bind(author.id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove the author row. Callers check for dependent books first.
pub async fn delete_author(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM authors WHERE guid = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_authors(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM authors")
        .fetch_one(pool)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;
    use chrono::NaiveDate;

    fn author(first: &str, family: &str) -> Author {
        Author::new(first.to_string(), family.to_string(), None, None)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let pool = memory_pool().await;
        let mut a = author("Isaac", "Asimov");
        a.date_of_birth = NaiveDate::from_ymd_opt(1920, 1, 2);

        insert_author(&pool, &a).await.unwrap();

        let loaded = find_author(&pool, a.id).await.unwrap().expect("author");
        assert_eq!(loaded, a);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let pool = memory_pool().await;
        assert!(find_author(&pool, Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_sorted_by_family_name() {
        let pool = memory_pool().await;
        for (first, family) in [("Patrick", "Rothfuss"), ("Isaac", "Asimov"), ("Ben", "Bova")] {
            insert_author(&pool, &author(first, family)).await.unwrap();
        }

        let names: Vec<String> = list_authors(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.family_name)
            .collect();
        assert_eq!(names, vec!["Asimov", "Bova", "Rothfuss"]);
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let pool = memory_pool().await;
        let mut a = author("Jim", "Jones");
        insert_author(&pool, &a).await.unwrap();

        a.first_name = "James".into();
        a.date_of_death = NaiveDate::from_ymd_opt(1999, 9, 9);
        assert!(update_author(&pool, &a).await.unwrap());

        let loaded = find_author(&pool, a.id).await.unwrap().unwrap();
        assert_eq!(loaded.first_name, "James");
        assert_eq!(loaded.date_of_death, NaiveDate::from_ymd_opt(1999, 9, 9));
        assert_eq!(count_authors(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let pool = memory_pool().await;
        let a = author("No", "Body");
        assert!(!update_author(&pool, &a).await.unwrap());
        assert!(!delete_author(&pool, a.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = memory_pool().await;
        let a = author("Gone", "Soon");
        insert_author(&pool, &a).await.unwrap();

        assert!(delete_author(&pool, a.id).await.unwrap());
        assert_eq!(count_authors(&pool).await.unwrap(), 0);
    }
}
