//! Plain data handed to the templates.

use crate::db::{CatalogEntry, DbAuthor, SortOrder};
use crate::server::flash::FlashMessage;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub title: &'static str,
    pub flashes: Vec<FlashMessage>,
    pub books: Vec<CatalogEntry>,
    pub current_sort: SortOrder,
    pub search_query: String,
}

/// Values echoed back into the author form.
#[derive(Debug, Default, Serialize)]
pub struct AuthorFormValues {
    pub name: String,
    pub birthdate: String,
    pub date_of_death: String,
}

#[derive(Debug, Serialize)]
pub struct AddAuthorView {
    pub title: &'static str,
    pub flashes: Vec<FlashMessage>,
    pub form: AuthorFormValues,
}

/// Values echoed back into the book form.
#[derive(Debug, Default, Serialize)]
pub struct BookFormValues {
    pub isbn: String,
    pub title: String,
    pub publication_year: String,
    pub author_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AddBookView {
    pub title: &'static str,
    pub flashes: Vec<FlashMessage>,
    pub authors: Vec<DbAuthor>,
    pub form: BookFormValues,
}

#[derive(Debug, Serialize)]
pub struct NotFoundView {
    pub title: &'static str,
    pub flashes: Vec<FlashMessage>,
    pub message: String,
}
