//! Author controllers
//!
//! List, detail, create, update and delete pages for authors. Detail and
//! delete pages load the author and the author's books together and join
//! the results; the first failing lookup aborts the request.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{debug, info};

use catalog_common::models::author::MAX_NAME_LENGTH;
use catalog_common::models::Author;
use catalog_common::uuid_utils::parse_id;

use crate::db;
use crate::validation::{sanitize, ValidationError, Validator};
use crate::views;
use crate::{AppState, CatalogError, CatalogResult};

/// Author create/update form, as submitted (and as re-rendered)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.birth_date_formatted(),
            date_of_death: author.death_date_formatted(),
        }
    }
}

impl AuthorForm {
    /// Trim every field
    pub fn sanitized(self) -> Self {
        Self {
            first_name: sanitize(&self.first_name),
            family_name: sanitize(&self.family_name),
            date_of_birth: sanitize(&self.date_of_birth),
            date_of_death: sanitize(&self.date_of_death),
        }
    }

    /// Build the author document, keeping `id`, or report every rejected field
    pub fn validate(&self, id: uuid::Uuid) -> Result<Author, Vec<ValidationError>> {
        let mut v = Validator::new();

        // No alphanumeric rule for first names: they may contain spaces
        v.not_empty("first_name", &self.first_name, "First name must be specified.");
        v.max_length(
            "first_name",
            &self.first_name,
            MAX_NAME_LENGTH,
            "First name must be at most 100 characters.",
        );
        v.not_empty("family_name", &self.family_name, "Family name must be specified.");
        v.alphanumeric("family_name", &self.family_name, "Family name must be alphanumeric text.");
        v.max_length(
            "family_name",
            &self.family_name,
            MAX_NAME_LENGTH,
            "Family name must be at most 100 characters.",
        );
        let date_of_birth = v.optional_date("date_of_birth", &self.date_of_birth);
        let date_of_death = v.optional_date("date_of_death", &self.date_of_death);

        if !v.is_valid() {
            return Err(v.into_errors());
        }

        Ok(Author {
            id,
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth,
            date_of_death,
        })
    }
}

/// Delete confirmation form
#[derive(Debug, Default, Deserialize)]
pub struct AuthorDeleteForm {
    #[serde(default)]
    pub authorid: String,
}

/// GET /catalog/authors
pub async fn author_list(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let authors = db::authors::list_authors(&state.db).await?;
    Ok(Html(views::authors::list_page("Author List", &authors)))
}

/// GET /catalog/author/:id
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id)?;

    let (author, books) = tokio::try_join!(
        db::authors::find_author(&state.db, id),
        db::books::find_books_by_author(&state.db, id),
    )?;

    let author = author.ok_or_else(|| CatalogError::NotFound("Author not found".to_string()))?;
    Ok(Html(views::authors::detail_page("Author Detail", &author, &books)))
}

/// GET /catalog/author/create
pub async fn author_create_get() -> Html<String> {
    Html(views::authors::form_page("Create Author", &AuthorForm::default(), &[]))
}

/// POST /catalog/author/create
pub async fn author_create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> CatalogResult<Response> {
    let form = form.sanitized();

    let author = match form.validate(catalog_common::uuid_utils::generate()) {
        Ok(author) => author,
        Err(errors) => {
            debug!("Rejected author form: {} error(s)", errors.len());
            return Ok(Html(views::authors::form_page("Create Author", &form, &errors)).into_response());
        }
    };

    db::authors::insert_author(&state.db, &author).await?;
    info!("Created author {} ({})", author.name(), author.id);

    Ok(Redirect::to(&author.url()).into_response())
}

/// GET /catalog/author/:id/delete
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Response> {
    let id = parse_id(&id)?;

    let (author, books) = tokio::try_join!(
        db::authors::find_author(&state.db, id),
        db::books::find_books_by_author(&state.db, id),
    )?;

    let Some(author) = author else {
        return Ok(Redirect::to("/catalog/authors").into_response());
    };
    Ok(Html(views::authors::delete_page("Delete Author", &author, &books)).into_response())
}

/// POST /catalog/author/:id/delete
///
/// Refuses to delete while any book still names the author: the delete page
/// is shown again with the blocking books instead.
pub async fn author_delete_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorDeleteForm>,
) -> CatalogResult<Response> {
    let raw_id = sanitize(&form.authorid);
    if raw_id.is_empty() {
        return Err(CatalogError::BadRequest("Author id must exist".to_string()));
    }
    let id = parse_id(&raw_id)?;

    let (author, books) = tokio::try_join!(
        db::authors::find_author(&state.db, id),
        db::books::find_books_by_author(&state.db, id),
    )?;

    let Some(author) = author else {
        return Ok(Redirect::to("/catalog/authors").into_response());
    };

    if !books.is_empty() {
        info!("Refusing to delete author {}: {} book(s) remain", author.id, books.len());
        return Ok(Html(views::authors::delete_page("Delete Author", &author, &books)).into_response());
    }

    db::authors::delete_author(&state.db, id).await?;
    info!("Deleted author {} ({})", author.name(), author.id);

    Ok(Redirect::to("/catalog/authors").into_response())
}

/// GET /catalog/author/:id/update
pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id)?;

    let author = db::authors::find_author(&state.db, id)
        .await?
        .ok_or_else(|| CatalogError::NotFound("Author not found".to_string()))?;

    Ok(Html(views::authors::form_page("Update Author", &AuthorForm::from(&author), &[])))
}

/// POST /catalog/author/:id/update
pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> CatalogResult<Response> {
    let id = parse_id(&id)?;
    let form = form.sanitized();

    let author = match form.validate(id) {
        Ok(author) => author,
        Err(errors) => {
            return Ok(Html(views::authors::form_page("Update Author", &form, &errors)).into_response());
        }
    };

    if !db::authors::update_author(&state.db, &author).await? {
        return Err(CatalogError::NotFound("Author not found".to_string()));
    }
    info!("Updated author {}", author.id);

    Ok(Redirect::to(&author.url()).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(first: &str, family: &str, born: &str, died: &str) -> AuthorForm {
        AuthorForm {
            first_name: first.into(),
            family_name: family.into(),
            date_of_birth: born.into(),
            date_of_death: died.into(),
        }
    }

    #[test]
    fn test_valid_form_builds_author() {
        let id = uuid::Uuid::new_v4();
        let author = form("Isaac", "Asimov", "1920-01-02", "").validate(id).unwrap();
        assert_eq!(author.id, id);
        assert_eq!(author.name(), "Asimov, Isaac");
        assert_eq!(author.birth_date_formatted(), "1920-01-02");
        assert_eq!(author.date_of_death, None);
    }

    #[test]
    fn test_sanitize_then_validate() {
        let f = form("  Ursula ", " LeGuin  ", " 1929-10-21 ", "").sanitized();
        assert_eq!(f.family_name, "LeGuin");
        assert!(f.validate(uuid::Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let errors = form("", "Le Guin", "someday", "1800-02-31")
            .validate(uuid::Uuid::new_v4())
            .unwrap_err();
        let messages: Vec<&str> = errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "First name must be specified.",
                "Family name must be alphanumeric text.",
                "Invalid date",
                "Invalid date",
            ]
        );
    }

    #[test]
    fn test_name_length_limit() {
        let long = "a".repeat(101);
        let errors = form(&long, "Smith", "", "").validate(uuid::Uuid::new_v4()).unwrap_err();
        assert_eq!(errors[0].param, "first_name");
    }

    #[test]
    fn test_form_from_author_round_trips_dates() {
        let author = form("Isaac", "Asimov", "1920-01-02", "1992-04-06")
            .validate(uuid::Uuid::new_v4())
            .unwrap();
        let f = AuthorForm::from(&author);
        assert_eq!(f.date_of_birth, "1920-01-02");
        assert_eq!(f.date_of_death, "1992-04-06");
    }
}
