//! HTTP handlers for catalog-web

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod index;
pub mod static_assets;

use axum::{
    response::Redirect,
    routing::get,
    Router,
};

use crate::AppState;

pub use health::health_routes;

/// Catalog pages under `/catalog`, plus the `/` redirect
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/catalog", get(index::index))
        // Authors
        .route("/catalog/authors", get(authors::author_list))
        .route(
            "/catalog/author/create",
            get(authors::author_create_get).post(authors::author_create_post),
        )
        .route("/catalog/author/:id", get(authors::author_detail))
        .route(
            "/catalog/author/:id/delete",
            get(authors::author_delete_get).post(authors::author_delete_post),
        )
        .route(
            "/catalog/author/:id/update",
            get(authors::author_update_get).post(authors::author_update_post),
        )
        // Genres
        .route("/catalog/genres", get(genres::genre_list))
        .route(
            "/catalog/genre/create",
            get(genres::genre_create_get).post(genres::genre_create_post),
        )
        .route("/catalog/genre/:id", get(genres::genre_detail))
        .route(
            "/catalog/genre/:id/delete",
            get(genres::genre_delete_get).post(genres::genre_delete_post),
        )
        .route(
            "/catalog/genre/:id/update",
            get(genres::genre_update_get).post(genres::genre_update_post),
        )
        // Books
        .route("/catalog/books", get(books::book_list))
        .route(
            "/catalog/book/create",
            get(books::book_create_get).post(books::book_create_post),
        )
        .route("/catalog/book/:id", get(books::book_detail))
        .route(
            "/catalog/book/:id/delete",
            get(books::book_delete_get).post(books::book_delete_post),
        )
        .route(
            "/catalog/book/:id/update",
            get(books::book_update_get).post(books::book_update_post),
        )
        // Book instances
        .route("/catalog/bookinstances", get(book_instances::bookinstance_list))
        .route(
            "/catalog/bookinstance/create",
            get(book_instances::bookinstance_create_get).post(book_instances::bookinstance_create_post),
        )
        .route("/catalog/bookinstance/:id", get(book_instances::bookinstance_detail))
        .route(
            "/catalog/bookinstance/:id/delete",
            get(book_instances::bookinstance_delete_get).post(book_instances::bookinstance_delete_post),
        )
        .route(
            "/catalog/bookinstance/:id/update",
            get(book_instances::bookinstance_update_get).post(book_instances::bookinstance_update_post),
        )
}

/// Stylesheet
pub fn static_routes() -> Router<AppState> {
    Router::new().route("/static/catalog.css", get(static_assets::serve_catalog_css))
}
