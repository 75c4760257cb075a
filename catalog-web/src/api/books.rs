//! Book controllers
//!
//! Book forms need every author and genre to offer as choices, so the form
//! pages load both lists together. Genre checkboxes submit repeated `genre`
//! fields, which is why the form body is taken as raw key/value pairs.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use catalog_common::models::{Author, Book, Genre};
use catalog_common::uuid_utils::parse_id;

use crate::db;
use crate::validation::{sanitize, ValidationError, Validator};
use crate::views;
use crate::{AppState, CatalogError, CatalogResult};

/// Book create/update form
#[derive(Debug, Clone, Default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genres: Vec<String>,
}

impl BookForm {
    /// Collect the urlencoded pairs; unknown keys are ignored
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "title" => form.title = value,
                "author" => form.author = value,
                "summary" => form.summary = value,
                "isbn" => form.isbn = value,
                "genre" => form.genres.push(value),
                _ => {}
            }
        }
        form
    }

    pub fn sanitized(self) -> Self {
        Self {
            title: sanitize(&self.title),
            author: sanitize(&self.author),
            summary: sanitize(&self.summary),
            isbn: sanitize(&self.isbn),
            genres: self
                .genres
                .iter()
                .map(|g| sanitize(g))
                .filter(|g| !g.is_empty())
                .collect(),
        }
    }

    pub fn is_genre_checked(&self, genre_id: Uuid) -> bool {
        let id = genre_id.to_string();
        self.genres.iter().any(|g| *g == id)
    }

    /// Build the book, checking references against the known authors and genres
    pub fn validate(
        &self,
        id: Uuid,
        authors: &[Author],
        genres: &[Genre],
    ) -> Result<Book, Vec<ValidationError>> {
        let mut v = Validator::new();

        v.not_empty("title", &self.title, "Title must not be empty.");
        let author_id = v.reference("author", &self.author, "Author must not be empty.");
        if let Some(author_id) = author_id {
            if !authors.iter().any(|a| a.id == author_id) {
                v.push("author", "Author must exist.");
            }
        }
        v.not_empty("summary", &self.summary, "Summary must not be empty.");
        v.not_empty("isbn", &self.isbn, "ISBN must not be empty.");

        let mut genre_ids = Vec::new();
        for raw in &self.genres {
            match Uuid::parse_str(raw) {
                Ok(genre_id) if genres.iter().any(|g| g.id == genre_id) => {
                    if !genre_ids.contains(&genre_id) {
                        genre_ids.push(genre_id);
                    }
                }
                _ => v.push("genre", "Unknown genre."),
            }
        }

        match (v.is_valid(), author_id) {
            (true, Some(author_id)) => Ok(Book {
                id,
                title: self.title.clone(),
                author_id,
                summary: self.summary.clone(),
                isbn: self.isbn.clone(),
                genre_ids,
            }),
            _ => Err(v.into_errors()),
        }
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author_id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genres: book.genre_ids.iter().map(Uuid::to_string).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BookDeleteForm {
    #[serde(default)]
    pub bookid: String,
}

/// GET /catalog/books
pub async fn book_list(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let books = db::books::list_books(&state.db).await?;
    Ok(Html(views::books::list_page("Book List", &books)))
}

/// GET /catalog/book/:id
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id)?;

    let (book, instances, genres) = tokio::try_join!(
        db::books::find_book(&state.db, id),
        db::book_instances::find_instances_by_book(&state.db, id),
        db::genres::genres_for_book(&state.db, id),
    )?;

    let book = book.ok_or_else(|| CatalogError::NotFound("Book not found".to_string()))?;
    let author = db::authors::find_author(&state.db, book.author_id).await?;
    if author.is_none() {
        warn!("Book {} references missing author {}", book.id, book.author_id);
    }

    Ok(Html(views::books::detail_page(
        "Book Detail",
        &book,
        author.as_ref(),
        &genres,
        &instances,
    )))
}

/// GET /catalog/book/create
pub async fn book_create_get(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let (authors, genres) = tokio::try_join!(
        db::authors::list_authors(&state.db),
        db::genres::list_genres(&state.db),
    )?;

    Ok(Html(views::books::form_page(
        "Create Book",
        &BookForm::default(),
        &authors,
        &genres,
        &[],
    )))
}

/// POST /catalog/book/create
pub async fn book_create_post(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> CatalogResult<Response> {
    let form = BookForm::from_pairs(pairs).sanitized();

    let (authors, genres) = tokio::try_join!(
        db::authors::list_authors(&state.db),
        db::genres::list_genres(&state.db),
    )?;

    let book = match form.validate(catalog_common::uuid_utils::generate(), &authors, &genres) {
        Ok(book) => book,
        Err(errors) => {
            let html = views::books::form_page("Create Book", &form, &authors, &genres, &errors);
            return Ok(Html(html).into_response());
        }
    };

    db::books::insert_book(&state.db, &book).await?;
    info!("Created book '{}' ({})", book.title, book.id);

    Ok(Redirect::to(&book.url()).into_response())
}

/// GET /catalog/book/:id/delete
pub async fn book_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Response> {
    let id = parse_id(&id)?;

    let (book, instances) = tokio::try_join!(
        db::books::find_book(&state.db, id),
        db::book_instances::find_instances_by_book(&state.db, id),
    )?;

    let Some(book) = book else {
        return Ok(Redirect::to("/catalog/books").into_response());
    };
    Ok(Html(views::books::delete_page("Delete Book", &book, &instances)).into_response())
}

/// POST /catalog/book/:id/delete
///
/// Blocked while any copy of the book exists.
pub async fn book_delete_post(
    State(state): State<AppState>,
    Form(form): Form<BookDeleteForm>,
) -> CatalogResult<Response> {
    let raw_id = sanitize(&form.bookid);
    if raw_id.is_empty() {
        return Err(CatalogError::BadRequest("Book id must exist".to_string()));
    }
    let id = parse_id(&raw_id)?;

    let (book, instances) = tokio::try_join!(
        db::books::find_book(&state.db, id),
        db::book_instances::find_instances_by_book(&state.db, id),
    )?;

    let Some(book) = book else {
        return Ok(Redirect::to("/catalog/books").into_response());
    };

    if !instances.is_empty() {
        info!("Refusing to delete book {}: {} copies remain", book.id, instances.len());
        return Ok(Html(views::books::delete_page("Delete Book", &book, &instances)).into_response());
    }

    db::books::delete_book(&state.db, id).await?;
    info!("Deleted book '{}' ({})", book.title, book.id);

    Ok(Redirect::to("/catalog/books").into_response())
}

/// GET /catalog/book/:id/update
pub async fn book_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id)?;

    let (book, authors, genres) = tokio::try_join!(
        db::books::find_book(&state.db, id),
        db::authors::list_authors(&state.db),
        db::genres::list_genres(&state.db),
    )?;

    let book = book.ok_or_else(|| CatalogError::NotFound("Book not found".to_string()))?;
    Ok(Html(views::books::form_page(
        "Update Book",
        &BookForm::from(&book),
        &authors,
        &genres,
        &[],
    )))
}

/// POST /catalog/book/:id/update
pub async fn book_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> CatalogResult<Response> {
    let id = parse_id(&id)?;
    let form = BookForm::from_pairs(pairs).sanitized();

    let (authors, genres) = tokio::try_join!(
        db::authors::list_authors(&state.db),
        db::genres::list_genres(&state.db),
    )?;

    let book = match form.validate(id, &authors, &genres) {
        Ok(book) => book,
        Err(errors) => {
            let html = views::books::form_page("Update Book", &form, &authors, &genres, &errors);
            return Ok(Html(html).into_response());
        }
    };

    if !db::books::update_book(&state.db, &book).await? {
        return Err(CatalogError::NotFound("Book not found".to_string()));
    }
    info!("Updated book {}", book.id);

    Ok(Redirect::to(&book.url()).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_from_pairs_collects_repeated_genres() {
        let form = BookForm::from_pairs(pairs(&[
            ("title", "Dune"),
            ("genre", "a"),
            ("genre", "b"),
            ("other", "x"),
        ]));
        assert_eq!(form.title, "Dune");
        assert_eq!(form.genres, vec!["a", "b"]);
    }

    #[test]
    fn test_validate_checks_references() {
        let author = Author::new("Frank".into(), "Herbert".into(), None, None);
        let genre = Genre::new("Science Fiction".into());

        let form = BookForm {
            title: "Dune".into(),
            author: author.id.to_string(),
            summary: "Spice".into(),
            isbn: "9780441013593".into(),
            genres: vec![genre.id.to_string(), genre.id.to_string()],
        };
        let book = form
            .validate(Uuid::new_v4(), std::slice::from_ref(&author), std::slice::from_ref(&genre))
            .unwrap();
        assert_eq!(book.author_id, author.id);
        assert_eq!(book.genre_ids, vec![genre.id]);

        let stranger = BookForm {
            author: Uuid::new_v4().to_string(),
            genres: vec!["nope".into()],
            ..form
        };
        let errors = stranger.validate(Uuid::new_v4(), &[author], &[genre]).unwrap_err();
        let messages: Vec<&str> = errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(messages, vec!["Author must exist.", "Unknown genre."]);
    }

    #[test]
    fn test_validate_required_fields() {
        let errors = BookForm::default().validate(Uuid::new_v4(), &[], &[]).unwrap_err();
        let params: Vec<&str> = errors.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(params, vec!["title", "author", "summary", "isbn"]);
    }
}
