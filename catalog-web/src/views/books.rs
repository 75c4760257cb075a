//! Book pages

use catalog_common::models::{Author, Book, BookInstance, BookListing, Genre, InstanceStatus};

use super::{checked, errors_list, escape, layout, selected};
use crate::api::books::BookForm;
use crate::validation::ValidationError;

pub fn list_page(title: &str, books: &[BookListing]) -> String {
    let body = if books.is_empty() {
        "        <p>There are no books.</p>\n".to_string()
    } else {
        let items: String = books
            .iter()
            .map(|b| {
                format!(
                    "            <li><a href=\"{}\">{}</a> ({})</li>\n",
                    b.url(),
                    escape(&b.title),
                    escape(&b.author_name)
                )
            })
            .collect();
        format!("        <ul>\n{}        </ul>\n", items)
    };
    layout(title, &body)
}

/// CSS class for a copy's status line
pub(crate) fn status_class(status: InstanceStatus) -> &'static str {
    match status {
        InstanceStatus::Available => "status-available",
        InstanceStatus::Maintenance => "status-maintenance",
        InstanceStatus::Loaned => "status-loaned",
        InstanceStatus::Reserved => "status-reserved",
    }
}

fn copies_section(instances: &[BookInstance]) -> String {
    if instances.is_empty() {
        return "        <p>There are no copies of this book in the library.</p>\n".to_string();
    }
    instances
        .iter()
        .map(|copy| {
            let due = if copy.status == InstanceStatus::Available {
                String::new()
            } else {
                format!("\n            <p><strong>Due back:</strong> {}</p>", copy.due_back_formatted())
            };
            format!(
                r#"        <div>
            <hr>
            <p class="{class}">{status}</p>
            <p><strong>Imprint:</strong> {imprint}</p>{due}
            <p><strong>Id:</strong> <a href="{url}">{id}</a></p>
        </div>
"#,
                class = status_class(copy.status),
                status = copy.status,
                imprint = escape(&copy.imprint),
                due = due,
                url = copy.url(),
                id = copy.id,
            )
        })
        .collect()
}

pub fn detail_page(
    title: &str,
    book: &Book,
    author: Option<&Author>,
    genres: &[Genre],
    instances: &[BookInstance],
) -> String {
    let author_html = match author {
        Some(a) => format!("<a href=\"{}\">{}</a>", a.url(), escape(&a.name())),
        None => "<span class=\"muted\">Unknown author</span>".to_string(),
    };
    let genres_html = genres
        .iter()
        .map(|g| format!("<a href=\"{}\">{}</a>", g.url(), escape(&g.name)))
        .collect::<Vec<_>>()
        .join(", ");

    let body = format!(
        r#"        <h2>Title: {book_title}</h2>
        <p><strong>Author:</strong> {author}</p>
        <p><strong>Summary:</strong> {summary}</p>
        <p><strong>ISBN:</strong> {isbn}</p>
        <p><strong>Genre:</strong> {genres}</p>
        <h3>Copies</h3>
{copies}        <hr>
        <p><a href="{url}/delete">Delete book</a></p>
        <p><a href="{url}/update">Update book</a></p>
"#,
        book_title = escape(&book.title),
        author = author_html,
        summary = escape(&book.summary),
        isbn = escape(&book.isbn),
        genres = genres_html,
        copies = copies_section(instances),
        url = book.url(),
    );
    layout(title, &body)
}

pub fn form_page(
    title: &str,
    form: &BookForm,
    authors: &[Author],
    genres: &[Genre],
    errors: &[ValidationError],
) -> String {
    let author_options: String = authors
        .iter()
        .map(|a| {
            format!(
                "                    <option value=\"{}\"{}>{}</option>\n",
                a.id,
                selected(form.author == a.id.to_string()),
                escape(&a.name())
            )
        })
        .collect();

    let genre_boxes: String = genres
        .iter()
        .map(|g| {
            format!(
                "                <label><input type=\"checkbox\" name=\"genre\" value=\"{}\"{}> {}</label>\n",
                g.id,
                checked(form.is_genre_checked(g.id)),
                escape(&g.name)
            )
        })
        .collect();

    let body = format!(
        r#"        <form method="POST" action="">
            <div class="form-group">
                <label for="title">Title:</label>
                <input id="title" type="text" name="title" placeholder="Name of book" value="{book_title}">
            </div>
            <div class="form-group">
                <label for="author">Author:</label>
                <select id="author" name="author">
                    <option value="">--Please select an author--</option>
{author_options}                </select>
            </div>
            <div class="form-group">
                <label for="summary">Summary:</label>
                <textarea id="summary" name="summary" rows="4" placeholder="Summary">{summary}</textarea>
            </div>
            <div class="form-group">
                <label for="isbn">ISBN:</label>
                <input id="isbn" type="text" name="isbn" placeholder="ISBN13" value="{isbn}">
            </div>
            <div class="form-group">
                <label>Genre:</label>
{genre_boxes}            </div>
            <button class="button" type="submit">Submit</button>
        </form>
{errors}"#,
        book_title = escape(&form.title),
        author_options = author_options,
        summary = escape(&form.summary),
        isbn = escape(&form.isbn),
        genre_boxes = genre_boxes,
        errors = errors_list(errors),
    );
    layout(title, &body)
}

pub fn delete_page(title: &str, book: &Book, instances: &[BookInstance]) -> String {
    let action = if instances.is_empty() {
        format!(
            r#"        <p>Do you really want to delete this Book?</p>
        <form method="POST" action="">
            <input type="hidden" name="bookid" value="{id}">
            <button class="button danger" type="submit">Delete</button>
        </form>
"#,
            id = book.id
        )
    } else {
        format!(
            "        <p><strong>Delete the following copies before attempting to delete this book.</strong></p>\n{}",
            copies_section(instances)
        )
    };
    let body = format!("        <h2>{}</h2>\n{}", escape(&book.title), action);
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_form_marks_selection() {
        let author = Author::new("Frank".into(), "Herbert".into(), None, None);
        let other = Author::new("Ben".into(), "Bova".into(), None, None);
        let genre = Genre::new("Science Fiction".into());
        let form = BookForm {
            author: author.id.to_string(),
            genres: vec![genre.id.to_string()],
            ..BookForm::default()
        };

        let html = form_page("Create Book", &form, &[author.clone(), other.clone()], &[genre.clone()], &[]);
        assert!(html.contains(&format!("<option value=\"{}\" selected>", author.id)));
        assert!(html.contains(&format!("<option value=\"{}\">", other.id)));
        assert!(html.contains(&format!("value=\"{}\" checked>", genre.id)));
    }

    #[test]
    fn test_detail_hides_due_date_for_available_copies() {
        let book = Book::new("Dune".into(), Uuid::new_v4(), "s".into(), "i".into(), vec![]);
        let due = chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let available = BookInstance::new(book.id, "A".into(), InstanceStatus::Available, due);
        let html = detail_page("Book Detail", &book, None, &[], &[available]);
        assert!(!html.contains("Due back"));
        assert!(html.contains("Unknown author"));

        let loaned = BookInstance::new(book.id, "B".into(), InstanceStatus::Loaned, due);
        let html = detail_page("Book Detail", &book, None, &[], &[loaned]);
        assert!(html.contains("Jan 5, 2026"));
    }
}
