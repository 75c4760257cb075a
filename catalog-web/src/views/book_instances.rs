//! Book instance (copy) pages

use catalog_common::models::{Book, BookInstance, BookListing, InstanceStatus};

use super::books::status_class;
use super::{errors_list, escape, layout, selected};
use crate::api::book_instances::BookInstanceForm;
use crate::db::book_instances::InstanceListing;
use crate::validation::ValidationError;

pub fn list_page(title: &str, copies: &[InstanceListing]) -> String {
    let body = if copies.is_empty() {
        "        <p>There are no book copies in this library.</p>\n".to_string()
    } else {
        let items: String = copies
            .iter()
            .map(|l| {
                let due = if l.instance.status == InstanceStatus::Available {
                    String::new()
                } else {
                    format!(" <span>(Due: {})</span>", l.instance.due_back_formatted())
                };
                format!(
                    "            <li><a href=\"{}\">{} : {}</a> - <span class=\"{}\">{}</span>{}</li>\n",
                    l.instance.url(),
                    escape(&l.book_title),
                    escape(&l.instance.imprint),
                    status_class(l.instance.status),
                    l.instance.status,
                    due
                )
            })
            .collect();
        format!("        <ul>\n{}        </ul>\n", items)
    };
    layout(title, &body)
}

fn book_link(book: Option<&Book>) -> String {
    match book {
        Some(b) => format!("<a href=\"{}\">{}</a>", b.url(), escape(&b.title)),
        None => "<span class=\"muted\">Unknown book</span>".to_string(),
    }
}

pub fn detail_page(title: &str, copy: &BookInstance, book: Option<&Book>) -> String {
    let due = if copy.status == InstanceStatus::Available {
        String::new()
    } else {
        format!("        <p><strong>Due back:</strong> {}</p>\n", copy.due_back_formatted())
    };
    let body = format!(
        r#"        <h2>ID: {id}</h2>
        <p><strong>Title:</strong> {book}</p>
        <p><strong>Imprint:</strong> {imprint}</p>
        <p><strong>Status:</strong> <span class="{class}">{status}</span></p>
{due}        <hr>
        <p><a href="{url}/delete">Delete BookInstance</a></p>
        <p><a href="{url}/update">Update BookInstance</a></p>
"#,
        id = copy.id,
        book = book_link(book),
        imprint = escape(&copy.imprint),
        class = status_class(copy.status),
        status = copy.status,
        due = due,
        url = copy.url(),
    );
    layout(title, &body)
}

pub fn form_page(
    title: &str,
    form: &BookInstanceForm,
    books: &[BookListing],
    errors: &[ValidationError],
) -> String {
    let book_options: String = books
        .iter()
        .map(|b| {
            format!(
                "                    <option value=\"{}\"{}>{}</option>\n",
                b.id,
                selected(form.book == b.id.to_string()),
                escape(&b.title)
            )
        })
        .collect();

    let current_status = if form.status.is_empty() {
        InstanceStatus::default().to_string()
    } else {
        form.status.clone()
    };
    let status_options: String = InstanceStatus::ALL
        .iter()
        .map(|s| {
            format!(
                "                    <option value=\"{s}\"{sel}>{s}</option>\n",
                s = s,
                sel = selected(current_status == s.as_str())
            )
        })
        .collect();

    let body = format!(
        r#"        <form method="POST" action="">
            <div class="form-group">
                <label for="book">Book:</label>
                <select id="book" name="book">
                    <option value="">--Please select a book--</option>
{book_options}                </select>
            </div>
            <div class="form-group">
                <label for="imprint">Imprint:</label>
                <input id="imprint" type="text" name="imprint" placeholder="Publisher and date information" value="{imprint}">
            </div>
            <div class="form-group">
                <label for="due_back">Date when book available:</label>
                <input id="due_back" type="date" name="due_back" value="{due_back}">
            </div>
            <div class="form-group">
                <label for="status">Status:</label>
                <select id="status" name="status">
{status_options}                </select>
            </div>
            <button class="button" type="submit">Submit</button>
        </form>
{errors}"#,
        book_options = book_options,
        imprint = escape(&form.imprint),
        due_back = escape(&form.due_back),
        status_options = status_options,
        errors = errors_list(errors),
    );
    layout(title, &body)
}

pub fn delete_page(title: &str, copy: &BookInstance, book: Option<&Book>) -> String {
    let body = format!(
        r#"        <h2>ID: {id}</h2>
        <p><strong>Title:</strong> {book}</p>
        <p><strong>Imprint:</strong> {imprint}</p>
        <p><strong>Status:</strong> {status}</p>
        <p>Do you really want to delete this BookInstance?</p>
        <form method="POST" action="">
            <input type="hidden" name="bookinstanceid" value="{id}">
            <button class="button danger" type="submit">Delete</button>
        </form>
"#,
        id = copy.id,
        book = book_link(book),
        imprint = escape(&copy.imprint),
        status = copy.status,
    );
    layout(title, &body)
}
