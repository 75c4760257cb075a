//! Author pages

use catalog_common::models::{Author, BookSummary};

use super::{errors_list, escape, layout};
use crate::api::authors::AuthorForm;
use crate::validation::ValidationError;

pub fn list_page(title: &str, authors: &[Author]) -> String {
    let body = if authors.is_empty() {
        "        <p>There are no authors.</p>\n".to_string()
    } else {
        let items: String = authors
            .iter()
            .map(|a| {
                format!(
                    "            <li><a href=\"{}\">{}</a> ({})</li>\n",
                    a.url(),
                    escape(&a.name()),
                    escape(&a.lifespan())
                )
            })
            .collect();
        format!("        <ul>\n{}        </ul>\n", items)
    };
    layout(title, &body)
}

fn books_section(books: &[BookSummary], empty_message: &str) -> String {
    if books.is_empty() {
        return format!("        <p>{}</p>\n", empty_message);
    }
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

pub fn detail_page(title: &str, author: &Author, books: &[BookSummary]) -> String {
    let body = format!(
        r#"        <h2>Author: {name}</h2>
        <p>{lifespan}</p>
        <h3>Books</h3>
{books}        <hr>
        <p><a href="{url}/delete">Delete author</a></p>
        <p><a href="{url}/update">Update author</a></p>
"#,
        name = escape(&author.name()),
        lifespan = escape(&author.lifespan()),
        books = books_section(books, "This author has no books."),
        url = author.url(),
    );
    layout(title, &body)
}

pub fn form_page(title: &str, form: &AuthorForm, errors: &[ValidationError]) -> String {
    let body = format!(
        r#"        <form method="POST" action="">
            <div class="form-group">
                <label for="first_name">First Name:</label>
                <input id="first_name" type="text" name="first_name" placeholder="First name (Christian)" value="{first_name}">
            </div>
            <div class="form-group">
                <label for="family_name">Family Name:</label>
                <input id="family_name" type="text" name="family_name" placeholder="Family name (surname)" value="{family_name}">
            </div>
            <div class="form-group">
                <label for="date_of_birth">Date of birth:</label>
                <input id="date_of_birth" type="date" name="date_of_birth" value="{date_of_birth}">
            </div>
            <div class="form-group">
                <label for="date_of_death">Date of death:</label>
                <input id="date_of_death" type="date" name="date_of_death" value="{date_of_death}">
            </div>
            <button class="button" type="submit">Submit</button>
        </form>
{errors}"#,
        first_name = escape(&form.first_name),
        family_name = escape(&form.family_name),
        date_of_birth = escape(&form.date_of_birth),
        date_of_death = escape(&form.date_of_death),
        errors = errors_list(errors),
    );
    layout(title, &body)
}

pub fn delete_page(title: &str, author: &Author, books: &[BookSummary]) -> String {
    let action = if books.is_empty() {
        format!(
            r#"        <p>Do you really want to delete this Author?</p>
        <form method="POST" action="">
            <input type="hidden" name="authorid" value="{id}">
            <button class="button danger" type="submit">Delete</button>
        </form>
"#,
            id = author.id
        )
    } else {
        format!(
            "        <p><strong>Delete the following books before attempting to delete this author.</strong></p>\n{}",
            books_section(books, "")
        )
    };

    let body = format!(
        "        <h2>{name}</h2>\n        <p>{lifespan}</p>\n{action}",
        name = escape(&author.name()),
        lifespan = escape(&author.lifespan()),
        action = action,
    );
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author::new("Isaac".into(), "Asimov".into(), None, None)
    }

    #[test]
    fn test_delete_page_offers_form_only_without_books() {
        let a = author();
        let html = delete_page("Delete Author", &a, &[]);
        assert!(html.contains(&format!("name=\"authorid\" value=\"{}\"", a.id)));

        let books = vec![BookSummary {
            id: uuid::Uuid::new_v4(),
            title: "Foundation".into(),
            summary: "Psychohistory".into(),
        }];
        let html = delete_page("Delete Author", &a, &books);
        assert!(!html.contains("name=\"authorid\""));
        assert!(html.contains("Delete the following books"));
        assert!(html.contains("Foundation"));
    }

    #[test]
    fn test_form_page_repopulates_and_escapes() {
        let form = AuthorForm {
            first_name: "<Jo>".into(),
            family_name: "\"Quote\"".into(),
            date_of_birth: "bad".into(),
            date_of_death: String::new(),
        };
        let errors = vec![ValidationError {
            param: "date_of_birth".into(),
            msg: "Invalid date".into(),
        }];
        let html = form_page("Create Author", &form, &errors);
        assert!(html.contains("value=\"&lt;Jo&gt;\""));
        assert!(html.contains("value=\"&quot;Quote&quot;\""));
        assert!(html.contains("value=\"bad\""));
        assert!(html.contains("<li>Invalid date</li>"));
    }
}
