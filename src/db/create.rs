use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorCreate {
    pub name: String,
    pub birth_date: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
}

/// `author_id` is not checked up front; the foreign key rejects unknown authors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookCreate {
    pub isbn: String,
    pub title: String,
    pub publication_year: i32,
    pub author_id: i64,
}
