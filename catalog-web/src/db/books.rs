//! Book database operations
//!
//! A book's genres live in the `book_genres` link table; inserts, updates
//! and deletes touch both tables inside one transaction.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use catalog_common::models::{Author, Book, BookListing, BookSummary};

use super::guid_column;

fn summary_from_row(row: &SqliteRow) -> Result<BookSummary> {
    Ok(BookSummary {
        id: guid_column(row, "guid")?,
        title: row.try_get("title")?,
        summary: row.try_get("summary")?,
    })
}

/// All books with their author's display name, sorted by title
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<BookListing>> {
    let rows = sqlx::query(
        r#"
        SELECT b.guid, b.title, a.guid AS author_guid, a.first_name, a.family_name
        FROM books b
        JOIN authors a ON a.guid = b.author_id
        ORDER BY b.title ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let author = Author {
                id: guid_column(row, "author_guid")?,
                first_name: row.try_get("first_name")?,
                family_name: row.try_get("family_name")?,
                date_of_birth: None,
                date_of_death: None,
            };
            Ok(BookListing {
                id: guid_column(row, "guid")?,
                title: row.try_get("title")?,
                author_name: author.name(),
            })
        })
        .collect()
}

/// Book with its genre ids
pub async fn find_book(pool: &SqlitePool, id: Uuid) -> Result<Option<Book>> {
    let row = sqlx::query(
        "SELECT guid, title, author_id, summary, isbn FROM books WHERE guid = ?",
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let genre_ids: Vec<String> =
        sqlx::query_scalar("SELECT genre_id FROM book_genres WHERE book_id = ? ORDER BY genre_id")
            .bind(id.to_string())
            .fetch_all(pool)
            .await?;

    Ok(Some(Book {
        id: guid_column(&row, "guid")?,
        title: row.try_get("title")?,
        author_id: guid_column(&row, "author_id")?,
        summary: row.try_get("summary")?,
        isbn: row.try_get("isbn")?,
        genre_ids: genre_ids
            .iter()
            .map(|g| catalog_common::uuid_utils::parse_stored(g))
            .collect::<catalog_common::Result<_>>()?,
    }))
}

/// An author's books, projected to title and summary
pub async fn find_books_by_author(pool: &SqlitePool, author_id: Uuid) -> Result<Vec<BookSummary>> {
    let rows = sqlx::query(
        "SELECT guid, title, summary FROM books WHERE author_id = ? ORDER BY title ASC",
    )
    .bind(author_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(summary_from_row).collect()
}

/// Books tagged with a genre, projected to title and summary
pub async fn find_books_by_genre(pool: &SqlitePool, genre_id: Uuid) -> Result<Vec<BookSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT b.guid, b.title, b.summary
        FROM books b
        JOIN book_genres bg ON bg.book_id = b.guid
        WHERE bg.genre_id = ?
        ORDER BY b.title ASC
        "#,
    )
    .bind(genre_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(summary_from_row).collect()
}

async fn link_genres(tx: &mut Transaction<'_, Sqlite>, book: &Book) -> Result<()> {
    for genre_id in &book.genre_ids {
        sqlx::query("INSERT OR IGNORE INTO book_genres (book_id, genre_id) VALUES (?, ?)")
            .bind(book.id.to_string())
            .bind(genre_id.to_string())
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

pub async fn insert_book(pool: &SqlitePool, book: &Book) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO books (guid, title, author_id, summary, isbn) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(book.id.to_string())
    .bind(&book.title)
    .bind(book.author_id.to_string())
    .bind(&book.summary)
    .bind(&book.isbn)
    .execute(&mut *tx)
    .await?;

    link_genres(&mut tx, book).await?;

    tx.commit().await?;
    Ok(())
}

/// Replace the book's fields and genre set; false when no such book
pub async fn update_book(pool: &SqlitePool, book: &Book) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE books
        SET title = ?, author_id = ?, summary = ?, isbn = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&book.title)
    .bind(book.author_id.to_string())
    .bind(&book.summary)
    .bind(&book.isbn)
    .bind(book.id.to_string())
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    sqlx::query("DELETE FROM book_genres WHERE book_id = ?")
        .bind(book.id.to_string())
        .execute(&mut *tx)
        .await?;
    link_genres(&mut tx, book).await?;

    tx.commit().await?;
    Ok(true)
}

/// Remove the book and its genre links. Callers check for copies first.
pub async fn delete_book(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM book_genres WHERE book_id = ?")
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM books WHERE guid = ?")
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_books(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?)
}
