//! Catalog home page

use super::layout;
use crate::api::index::CatalogCounts;

pub fn index_page(title: &str, counts: &CatalogCounts) -> String {
    let body = format!(
        r#"        <p>Welcome to the library catalog.</p>
        <h2>Dynamic content</h2>
        <p>The library has the following record counts:</p>
        <ul>
            <li><strong>Books:</strong> {books}</li>
            <li><strong>Copies:</strong> {copies}</li>
            <li><strong>Copies available:</strong> {available}</li>
            <li><strong>Authors:</strong> {authors}</li>
            <li><strong>Genres:</strong> {genres}</li>
        </ul>
"#,
        books = counts.books,
        copies = counts.copies,
        available = counts.available_copies,
        authors = counts.authors,
        genres = counts.genres,
    );
    layout(title, &body)
}
