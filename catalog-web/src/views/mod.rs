//! HTML views
//!
//! Pages are assembled with `format!` templates. Every value that came from
//! a user or the database goes through [`escape`] before it is interpolated.

use axum::http::StatusCode;

use crate::validation::ValidationError;

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod index;

/// Escape text for use in HTML element content and quoted attribute values
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full page: sidebar navigation plus the given body
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/catalog.css">
</head>
<body>
<div class="layout">
    <nav class="sidebar">
        <ul>
            <li><a href="/catalog">Home</a></li>
            <li><a href="/catalog/books">All books</a></li>
            <li><a href="/catalog/authors">All authors</a></li>
            <li><a href="/catalog/genres">All genres</a></li>
            <li><a href="/catalog/bookinstances">All book-instances</a></li>
        </ul>
        <hr>
        <ul>
            <li><a href="/catalog/author/create">Create new author</a></li>
            <li><a href="/catalog/genre/create">Create new genre</a></li>
            <li><a href="/catalog/book/create">Create new book</a></li>
            <li><a href="/catalog/bookinstance/create">Create new book instance (copy)</a></li>
        </ul>
    </nav>
    <main class="content">
        <h1>{title}</h1>
{body}
    </main>
</div>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

/// Error list shown above a rejected form; empty when there are no errors
pub fn errors_list(errors: &[ValidationError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("            <li>{}</li>\n", escape(&e.msg)))
        .collect();
    format!("        <ul class=\"errors\">\n{}        </ul>\n", items)
}

/// Page rendered by the generic error handler
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "        <p>{}</p>\n        <p class=\"muted\">{}</p>\n",
        escape(message),
        status
    );
    layout(status.canonical_reason().unwrap_or("Error"), &body)
}

/// `selected` attribute for an `<option>`
pub(crate) fn selected(is_selected: bool) -> &'static str {
    if is_selected {
        " selected"
    } else {
        ""
    }
}

/// `checked` attribute for a checkbox
pub(crate) fn checked(is_checked: bool) -> &'static str {
    if is_checked {
        " checked"
    } else {
        ""
    }
}
