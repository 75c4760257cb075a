//! Book entity and its projections

use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

impl Book {
    pub fn new(title: String, author_id: Uuid, summary: String, isbn: String, genre_ids: Vec<Uuid>) -> Self {
        Self {
            id: crate::uuid_utils::generate(),
            title,
            author_id,
            summary,
            isbn,
            genre_ids,
        }
    }

    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Book reduced to title and summary (author and genre works lists)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
}

impl BookSummary {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Row of the book list: title plus the author's display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookListing {
    pub id: Uuid,
    pub title: String,
    pub author_name: String,
}

impl BookListing {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projections_share_url() {
        let book = Book::new("Dune".into(), Uuid::new_v4(), "Spice".into(), "978-0441013593".into(), vec![]);
        let summary = BookSummary {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
        };
        assert_eq!(book.url(), summary.url());
        assert!(book.url().starts_with("/catalog/book/"));
    }
}
