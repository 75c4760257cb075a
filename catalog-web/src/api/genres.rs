//! Genre controllers
//!
//! Genre names are unique without regard to case, enforced by the unique
//! `name_key` column: creating a genre that already exists redirects to the
//! existing one, and renaming onto another genre's name is rejected.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use catalog_common::models::genre::{MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use catalog_common::models::Genre;
use catalog_common::uuid_utils::parse_id;

use crate::db;
use crate::validation::{sanitize, ValidationError, Validator};
use crate::views;
use crate::{AppState, CatalogError, CatalogResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
}

impl GenreForm {
    pub fn sanitized(self) -> Self {
        Self {
            name: sanitize(&self.name),
        }
    }

    pub fn validate(&self, id: Uuid) -> Result<Genre, Vec<ValidationError>> {
        let mut v = Validator::new();
        v.not_empty("name", &self.name, "Genre name required");
        v.min_length(
            "name",
            &self.name,
            MIN_NAME_LENGTH,
            "Genre name must contain at least 3 characters.",
        );
        v.max_length(
            "name",
            &self.name,
            MAX_NAME_LENGTH,
            "Genre name must be at most 100 characters.",
        );

        if !v.is_valid() {
            return Err(v.into_errors());
        }
        Ok(Genre {
            id,
            name: self.name.clone(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenreDeleteForm {
    #[serde(default)]
    pub genreid: String,
}

/// GET /catalog/genres
pub async fn genre_list(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let genres = db::genres::list_genres(&state.db).await?;
    Ok(Html(views::genres::list_page("Genre List", &genres)))
}

/// GET /catalog/genre/:id
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id)?;

    let (genre, books) = tokio::try_join!(
        db::genres::find_genre(&state.db, id),
        db::books::find_books_by_genre(&state.db, id),
    )?;

    let genre = genre.ok_or_else(|| CatalogError::NotFound("Genre not found".to_string()))?;
    Ok(Html(views::genres::detail_page("Genre Detail", &genre, &books)))
}

/// GET /catalog/genre/create
pub async fn genre_create_get() -> Html<String> {
    Html(views::genres::form_page("Create Genre", &GenreForm::default(), &[]))
}

/// POST /catalog/genre/create
pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> CatalogResult<Response> {
    let form = form.sanitized();

    let genre = match form.validate(catalog_common::uuid_utils::generate()) {
        Ok(genre) => genre,
        Err(errors) => {
            return Ok(Html(views::genres::form_page("Create Genre", &form, &errors)).into_response());
        }
    };

    if let Some(existing) = db::genres::find_genre_by_name(&state.db, &genre.name).await? {
        info!("Genre '{}' already exists, redirecting", existing.name);
        return Ok(Redirect::to(&existing.url()).into_response());
    }

    // A concurrent create of the same name can land between the lookup and
    // the insert; the unique key rejects ours and we follow theirs.
    if let Err(e) = db::genres::insert_genre(&state.db, &genre).await {
        if !db::is_unique_violation(&e) {
            return Err(e.into());
        }
        let existing = db::genres::find_genre_by_name(&state.db, &genre.name)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Genre '{}' rejected as duplicate but not found", genre.name))?;
        info!("Genre '{}' created concurrently, redirecting", existing.name);
        return Ok(Redirect::to(&existing.url()).into_response());
    }
    info!("Created genre '{}' ({})", genre.name, genre.id);

    Ok(Redirect::to(&genre.url()).into_response())
}

/// GET /catalog/genre/:id/delete
pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Response> {
    let id = parse_id(&id)?;

    let (genre, books) = tokio::try_join!(
        db::genres::find_genre(&state.db, id),
        db::books::find_books_by_genre(&state.db, id),
    )?;

    let Some(genre) = genre else {
        return Ok(Redirect::to("/catalog/genres").into_response());
    };
    Ok(Html(views::genres::delete_page("Delete Genre", &genre, &books)).into_response())
}

/// POST /catalog/genre/:id/delete
///
/// Blocked while any book is tagged with the genre.
pub async fn genre_delete_post(
    State(state): State<AppState>,
    Form(form): Form<GenreDeleteForm>,
) -> CatalogResult<Response> {
    let raw_id = sanitize(&form.genreid);
    if raw_id.is_empty() {
        return Err(CatalogError::BadRequest("Genre id must exist".to_string()));
    }
    let id = parse_id(&raw_id)?;

    let (genre, books) = tokio::try_join!(
        db::genres::find_genre(&state.db, id),
        db::books::find_books_by_genre(&state.db, id),
    )?;

    let Some(genre) = genre else {
        return Ok(Redirect::to("/catalog/genres").into_response());
    };

    if !books.is_empty() {
        info!("Refusing to delete genre {}: {} book(s) remain", genre.id, books.len());
        return Ok(Html(views::genres::delete_page("Delete Genre", &genre, &books)).into_response());
    }

    db::genres::delete_genre(&state.db, id).await?;
    info!("Deleted genre '{}' ({})", genre.name, genre.id);

    Ok(Redirect::to("/catalog/genres").into_response())
}

/// GET /catalog/genre/:id/update
pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id)?;

    let genre = db::genres::find_genre(&state.db, id)
        .await?
        .ok_or_else(|| CatalogError::NotFound("Genre not found".to_string()))?;

    let form = GenreForm { name: genre.name };
    Ok(Html(views::genres::form_page("Update Genre", &form, &[])))
}

/// POST /catalog/genre/:id/update
pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> CatalogResult<Response> {
    let id = parse_id(&id)?;
    let form = form.sanitized();

    let genre = match form.validate(id) {
        Ok(genre) => genre,
        Err(errors) => {
            return Ok(Html(views::genres::form_page("Update Genre", &form, &errors)).into_response());
        }
    };

    if let Some(existing) = db::genres::find_genre_by_name(&state.db, &genre.name).await? {
        if existing.id != id {
            let errors = [name_taken(&existing.name)];
            return Ok(Html(views::genres::form_page("Update Genre", &form, &errors)).into_response());
        }
    }

    let updated = match db::genres::update_genre(&state.db, &genre).await {
        Ok(updated) => updated,
        Err(e) if db::is_unique_violation(&e) => {
            // Another genre took the name after the lookup above
            let errors = [name_taken(&genre.name)];
            return Ok(Html(views::genres::form_page("Update Genre", &form, &errors)).into_response());
        }
        Err(e) => return Err(e.into()),
    };
    if !updated {
        return Err(CatalogError::NotFound("Genre not found".to_string()));
    }
    info!("Updated genre {}", genre.id);

    Ok(Redirect::to(&genre.url()).into_response())
}

fn name_taken(name: &str) -> ValidationError {
    ValidationError {
        param: "name".to_string(),
        msg: format!("Genre '{}' already exists.", name),
    }
}
