//! Genre pages

use catalog_common::models::{BookSummary, Genre};

use super::{errors_list, escape, layout};
use crate::api::genres::GenreForm;
use crate::validation::ValidationError;

pub fn list_page(title: &str, genres: &[Genre]) -> String {
    let body = if genres.is_empty() {
        "        <p>There are no genres.</p>\n".to_string()
    } else {
        let items: String = genres
            .iter()
            .map(|g| format!("            <li><a href=\"{}\">{}</a></li>\n", g.url(), escape(&g.name)))
            .collect();
        format!("        <ul>\n{}        </ul>\n", items)
    };
    layout(title, &body)
}

fn books_section(books: &[BookSummary]) -> String {
    let items: String = books
        .iter()
        .map(|b| {
            format!(
                "            <dt><a href=\"{}\">{}</a></dt>\n            <dd>{}</dd>\n",
                b.url(),
                escape(&b.title),
                escape(&b.summary)
            )
        })
        .collect();
    format!("        <dl>\n{}        </dl>\n", items)
}

pub fn detail_page(title: &str, genre: &Genre, books: &[BookSummary]) -> String {
    let books_html = if books.is_empty() {
        "        <p>There are no books in this genre.</p>\n".to_string()
    } else {
        books_section(books)
    };
    let body = format!(
        r#"        <h2>Genre: {name}</h2>
        <h3>Books</h3>
{books}        <hr>
        <p><a href="{url}/delete">Delete genre</a></p>
        <p><a href="{url}/update">Update genre</a></p>
"#,
        name = escape(&genre.name),
        books = books_html,
        url = genre.url(),
    );
    layout(title, &body)
}

pub fn form_page(title: &str, form: &GenreForm, errors: &[ValidationError]) -> String {
    let body = format!(
        r#"        <form method="POST" action="">
            <div class="form-group">
                <label for="name">Genre:</label>
                <input id="name" type="text" name="name" placeholder="Fantasy, Poetry etc." value="{name}">
            </div>
            <button class="button" type="submit">Submit</button>
        </form>
{errors}"#,
        name = escape(&form.name),
        errors = errors_list(errors),
    );
    layout(title, &body)
}

pub fn delete_page(title: &str, genre: &Genre, books: &[BookSummary]) -> String {
    let action = if books.is_empty() {
        format!(
            r#"        <p>Do you really want to delete this Genre?</p>
        <form method="POST" action="">
            <input type="hidden" name="genreid" value="{id}">
            <button class="button danger" type="submit">Delete</button>
        </form>
"#,
            id = genre.id
        )
    } else {
        format!(
            "        <p><strong>Delete the following books before attempting to delete this genre.</strong></p>\n{}",
            books_section(books)
        )
    };
    let body = format!("        <h2>{}</h2>\n{}", escape(&genre.name), action);
    layout(title, &body)
}
