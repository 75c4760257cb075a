//! Book instance (copy) controllers
//!
//! Copies have no dependents, so deleting one needs no guard.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use catalog_common::models::{BookInstance, BookListing, InstanceStatus};
use catalog_common::time::{format_form_date, today};
use catalog_common::uuid_utils::parse_id;

use crate::db;
use crate::validation::{sanitize, ValidationError, Validator};
use crate::views;
use crate::{AppState, CatalogError, CatalogResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookInstanceForm {
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: String,
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(copy: &BookInstance) -> Self {
        Self {
            book: copy.book_id.to_string(),
            imprint: copy.imprint.clone(),
            status: copy.status.to_string(),
            due_back: copy.due_back_form_value(),
        }
    }
}

impl BookInstanceForm {
    pub fn sanitized(self) -> Self {
        Self {
            book: sanitize(&self.book),
            imprint: sanitize(&self.imprint),
            status: sanitize(&self.status),
            due_back: sanitize(&self.due_back),
        }
    }

    /// Empty status means the default; empty due date means today
    pub fn validate(&self, id: Uuid, books: &[BookListing]) -> Result<BookInstance, Vec<ValidationError>> {
        let mut v = Validator::new();

        let book_id = v.reference("book", &self.book, "Book must be specified.");
        if let Some(book_id) = book_id {
            if !books.iter().any(|b| b.id == book_id) {
                v.push("book", "Book must exist.");
            }
        }
        v.not_empty("imprint", &self.imprint, "Imprint must be specified.");

        let status = if self.status.is_empty() {
            InstanceStatus::default()
        } else {
            self.status.parse::<InstanceStatus>().unwrap_or_else(|_| {
                v.push("status", "Invalid status.");
                InstanceStatus::default()
            })
        };
        let due_back = v.optional_date("due_back", &self.due_back).unwrap_or_else(today);

        match (v.is_valid(), book_id) {
            (true, Some(book_id)) => Ok(BookInstance {
                id,
                book_id,
                imprint: self.imprint.clone(),
                status,
                due_back,
            }),
            _ => Err(v.into_errors()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BookInstanceDeleteForm {
    #[serde(default)]
    pub bookinstanceid: String,
}

/// GET /catalog/bookinstances
pub async fn bookinstance_list(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let copies = db::book_instances::list_book_instances(&state.db).await?;
    Ok(Html(views::book_instances::list_page("Book Instance List", &copies)))
}

/// GET /catalog/bookinstance/:id
pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id)?;

    let copy = db::book_instances::find_book_instance(&state.db, id)
        .await?
        .ok_or_else(|| CatalogError::NotFound("Book copy not found".to_string()))?;
    let book = db::books::find_book(&state.db, copy.book_id).await?;

    Ok(Html(views::book_instances::detail_page("Book Instance Detail", &copy, book.as_ref())))
}

/// GET /catalog/bookinstance/create
pub async fn bookinstance_create_get(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let books = db::books::list_books(&state.db).await?;
    let form = BookInstanceForm {
        due_back: format_form_date(Some(today())),
        ..BookInstanceForm::default()
    };
    Ok(Html(views::book_instances::form_page("Create BookInstance", &form, &books, &[])))
}

/// POST /catalog/bookinstance/create
pub async fn bookinstance_create_post(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> CatalogResult<Response> {
    let form = form.sanitized();
    let books = db::books::list_books(&state.db).await?;

    let copy = match form.validate(catalog_common::uuid_utils::generate(), &books) {
        Ok(copy) => copy,
        Err(errors) => {
            let html = views::book_instances::form_page("Create BookInstance", &form, &books, &errors);
            return Ok(Html(html).into_response());
        }
    };

    db::book_instances::insert_book_instance(&state.db, &copy).await?;
    info!("Created book copy {} of book {}", copy.id, copy.book_id);

    Ok(Redirect::to(&copy.url()).into_response())
}

/// GET /catalog/bookinstance/:id/delete
pub async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Response> {
    let id = parse_id(&id)?;

    let Some(copy) = db::book_instances::find_book_instance(&state.db, id).await? else {
        return Ok(Redirect::to("/catalog/bookinstances").into_response());
    };
    let book = db::books::find_book(&state.db, copy.book_id).await?;

    Ok(Html(views::book_instances::delete_page("Delete BookInstance", &copy, book.as_ref())).into_response())
}

/// POST /catalog/bookinstance/:id/delete
pub async fn bookinstance_delete_post(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceDeleteForm>,
) -> CatalogResult<Response> {
    let raw_id = sanitize(&form.bookinstanceid);
    if raw_id.is_empty() {
        return Err(CatalogError::BadRequest("Book instance id must exist".to_string()));
    }
    let id = parse_id(&raw_id)?;

    if db::book_instances::delete_book_instance(&state.db, id).await? {
        info!("Deleted book copy {}", id);
    }

    Ok(Redirect::to("/catalog/bookinstances").into_response())
}

/// GET /catalog/bookinstance/:id/update
pub async fn bookinstance_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CatalogResult<Html<String>> {
    let id = parse_id(&id)?;

    let (copy, books) = tokio::try_join!(
        db::book_instances::find_book_instance(&state.db, id),
        db::books::list_books(&state.db),
    )?;

    let copy = copy.ok_or_else(|| CatalogError::NotFound("Book copy not found".to_string()))?;
    Ok(Html(views::book_instances::form_page(
        "Update BookInstance",
        &BookInstanceForm::from(&copy),
        &books,
        &[],
    )))
}

/// POST /catalog/bookinstance/:id/update
pub async fn bookinstance_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> CatalogResult<Response> {
    let id = parse_id(&id)?;
    let form = form.sanitized();
    let books = db::books::list_books(&state.db).await?;

    let copy = match form.validate(id, &books) {
        Ok(copy) => copy,
        Err(errors) => {
            let html = views::book_instances::form_page("Update BookInstance", &form, &books, &errors);
            return Ok(Html(html).into_response());
        }
    };

    if !db::book_instances::update_book_instance(&state.db, &copy).await? {
        return Err(CatalogError::NotFound("Book copy not found".to_string()));
    }
    info!("Updated book copy {}", copy.id);

    Ok(Redirect::to(&copy.url()).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> BookListing {
        BookListing {
            id: Uuid::new_v4(),
            title: "Dune".into(),
            author_name: "Herbert, Frank".into(),
        }
    }

    #[test]
    fn test_defaults_for_empty_status_and_date() {
        let book = listing();
        let form = BookInstanceForm {
            book: book.id.to_string(),
            imprint: "Ace, 1990".into(),
            status: String::new(),
            due_back: String::new(),
        };
        let copy = form.validate(Uuid::new_v4(), &[book]).unwrap();
        assert_eq!(copy.status, InstanceStatus::Maintenance);
        assert_eq!(copy.due_back, today());
    }

    #[test]
    fn test_invalid_fields() {
        let form = BookInstanceForm {
            book: Uuid::new_v4().to_string(),
            imprint: String::new(),
            status: "Lost".into(),
            due_back: "tomorrow".into(),
        };
        let errors = form.validate(Uuid::new_v4(), &[listing()]).unwrap_err();
        let messages: Vec<&str> = errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Book must exist.", "Imprint must be specified.", "Invalid status.", "Invalid date"]
        );
    }

    #[test]
    fn test_form_round_trip() {
        let book = listing();
        let due = chrono::NaiveDate::from_ymd_opt(2026, 12, 24).unwrap();
        let copy = BookInstance::new(book.id, "Gollancz".into(), InstanceStatus::Reserved, due);
        let rebuilt = BookInstanceForm::from(&copy).validate(copy.id, &[book]).unwrap();
        assert_eq!(rebuilt, copy);
    }
}
