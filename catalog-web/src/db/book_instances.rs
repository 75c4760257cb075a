//! Book instance (copy) database operations

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use catalog_common::models::{BookInstance, InstanceStatus};

use super::guid_column;

/// A copy together with the title of the book it belongs to
#[derive(Debug, Clone)]
pub struct InstanceListing {
    pub instance: BookInstance,
    pub book_title: String,
}

fn instance_from_row(row: &SqliteRow) -> Result<BookInstance> {
    let status: String = row.try_get("status")?;
    Ok(BookInstance {
        id: guid_column(row, "guid")?,
        book_id: guid_column(row, "book_id")?,
        imprint: row.try_get("imprint")?,
        status: status.parse::<InstanceStatus>()?,
        due_back: row.try_get("due_back")?,
    })
}

pub async fn list_book_instances(pool: &SqlitePool) -> Result<Vec<InstanceListing>> {
    let rows = sqlx::query(
        r#"
        SELECT bi.guid, bi.book_id, bi.imprint, bi.status, bi.due_back, b.title
        FROM book_instances bi
        JOIN books b ON b.guid = bi.book_id
        ORDER BY b.title ASC, bi.imprint ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(InstanceListing {
                instance: instance_from_row(row)?,
                book_title: row.try_get("title")?,
            })
        })
        .collect()
}

pub async fn find_book_instance(pool: &SqlitePool, id: Uuid) -> Result<Option<BookInstance>> {
    let row = sqlx::query(
        "SELECT guid, book_id, imprint, status, due_back FROM book_instances WHERE guid = ?",
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(instance_from_row).transpose()
}

/// Every copy of a book
pub async fn find_instances_by_book(pool: &SqlitePool, book_id: Uuid) -> Result<Vec<BookInstance>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, book_id, imprint, status, due_back
        FROM book_instances
        WHERE book_id = ?
        ORDER BY imprint ASC
        "#,
    )
    .bind(book_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(instance_from_row).collect()
}

pub async fn insert_book_instance(pool: &SqlitePool, instance: &BookInstance) -> Result<()> {
    sqlx::query(
        "INSERT INTO book_instances (guid, book_id, imprint, status, due_back) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(instance.id.to_string())
    .bind(instance.book_id.to_string())
    .bind(&instance.imprint)
    .bind(instance.status.as_str())
    .bind(instance.due_back)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_book_instance(pool: &SqlitePool, instance: &BookInstance) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE book_instances
        SET book_id = ?, imprint = ?, status = ?, due_back = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(instance.book_id.to_string())
    .bind(&instance.imprint)
    .bind(instance.status.as_str())
    .bind(instance.due_back)
    .bind(instance.id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_book_instance(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM book_instances WHERE guid = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_book_instances(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
        .fetch_one(pool)
        .await?)
}

pub async fn count_available_instances(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = ?")
        .bind(InstanceStatus::Available.as_str())
        .fetch_one(pool)
        .await?)
}
