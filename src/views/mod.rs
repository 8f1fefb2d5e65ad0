//! Server-rendered HTML. Templates are compiled into the binary and registered once.

pub mod context;
pub mod helpers;

pub use context::{
    AddAuthorView, AddBookView, AuthorFormValues, BookFormValues, HomeView, NotFoundView,
};
pub use helpers::cover_url;

use crate::error::CatalogError;
use handlebars::{Handlebars, TemplateError};
use serde::Serialize;
use tracing::debug;

pub const HOME_TEMPLATE: &str = "home";
pub const ADD_AUTHOR_TEMPLATE: &str = "add_author";
pub const ADD_BOOK_TEMPLATE: &str = "add_book";
pub const NOT_FOUND_TEMPLATE: &str = "not_found";

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("../../templates/header.hbs")),
    ("footer", include_str!("../../templates/footer.hbs")),
];

const TEMPLATES: [(&str, &str); 4] = [
    (HOME_TEMPLATE, include_str!("../../templates/home.hbs")),
    (ADD_AUTHOR_TEMPLATE, include_str!("../../templates/add_author.hbs")),
    (ADD_BOOK_TEMPLATE, include_str!("../../templates/add_book.hbs")),
    (NOT_FOUND_TEMPLATE, include_str!("../../templates/not_found.hbs")),
];

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }
        helpers::register_helpers(&mut registry);
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, template: &str, ctx: &T) -> Result<String, CatalogError> {
        log_context(template, ctx);
        Ok(self.registry.render(template, ctx)?)
    }
}

fn log_context<T: Serialize>(template: &str, ctx: &T) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let pretty_json = serde_json::to_string_pretty(ctx)
        .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
    debug!(template, context = %pretty_json, "Rendering template");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{CatalogEntry, DbAuthor, DbBook, SortOrder};
    use crate::server::flash::FlashMessage;
    use chrono::NaiveDate;

    fn sample_entry() -> CatalogEntry {
        CatalogEntry {
            book: DbBook {
                id: 3,
                isbn: "9780000000001".to_string(),
                title: "Dune <Deluxe>".to_string(),
                publication_year: 1965,
                author_id: 1,
            },
            author: DbAuthor {
                id: 1,
                name: "Frank Herbert".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1920, 10, 8).expect("valid date"),
                date_of_death: NaiveDate::from_ymd_opt(1986, 2, 11),
            },
        }
    }

    #[test]
    fn home_lists_books_with_cover_and_delete_form() {
        let views = Views::new().expect("templates compile");
        let html = views
            .render(
                HOME_TEMPLATE,
                &HomeView {
                    title: "Library",
                    flashes: vec![FlashMessage::success("Book added successfully.")],
                    books: vec![sample_entry()],
                    current_sort: SortOrder::Author,
                    search_query: "dune".to_string(),
                },
            )
            .expect("render home");

        assert!(html.contains("https://covers.openlibrary.org/b/isbn/9780000000001-M.jpg"));
        assert!(html.contains("Dune &lt;Deluxe&gt;"));
        assert!(html.contains("Frank Herbert"));
        assert!(html.contains(r#"action="/book/3/delete""#));
        assert!(html.contains(r#"<option value="author" selected>"#));
        assert!(html.contains("flash-success"));
        assert!(html.contains("Book added successfully."));
    }

    #[test]
    fn home_without_books_says_so() {
        let views = Views::new().expect("templates compile");
        let html = views
            .render(
                HOME_TEMPLATE,
                &HomeView {
                    title: "Library",
                    flashes: Vec::new(),
                    books: Vec::new(),
                    current_sort: SortOrder::Title,
                    search_query: String::new(),
                },
            )
            .expect("render home");
        assert!(html.contains("No books found."));
        assert!(html.contains(r#"<option value="title" selected>"#));
    }

    #[test]
    fn add_book_preselects_submitted_author() {
        let views = Views::new().expect("templates compile");
        let entry = sample_entry();
        let html = views
            .render(
                ADD_BOOK_TEMPLATE,
                &AddBookView {
                    title: "Add book",
                    flashes: vec![FlashMessage::error("All fields are required!")],
                    authors: vec![entry.author],
                    form: BookFormValues {
                        isbn: "42".to_string(),
                        author_id: Some(1),
                        ..Default::default()
                    },
                },
            )
            .expect("render add_book");
        assert!(html.contains(r#"<option value="1" selected>Frank Herbert</option>"#));
        assert!(html.contains(r#"value="42""#));
        assert!(html.contains("flash-error"));
    }
}
