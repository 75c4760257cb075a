//! Catalog home page

use axum::{extract::State, response::Html};
use serde::Serialize;

use crate::db;
use crate::views;
use crate::{AppState, CatalogResult};

/// Record counts shown on the home page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub books: i64,
    pub copies: i64,
    pub available_copies: i64,
    pub authors: i64,
    pub genres: i64,
}

/// GET /catalog
pub async fn index(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let (books, copies, available_copies, authors, genres) = tokio::try_join!(
        db::books::count_books(&state.db),
        db::book_instances::count_book_instances(&state.db),
        db::book_instances::count_available_instances(&state.db),
        db::authors::count_authors(&state.db),
        db::genres::count_genres(&state.db),
    )?;

    let counts = CatalogCounts {
        books,
        copies,
        available_copies,
        authors,
        genres,
    };
    Ok(Html(views::index::index_page("Local Library Home", &counts)))
}
