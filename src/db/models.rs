use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbAuthor {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
    /// `None` means living or unknown.
    pub date_of_death: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbBook {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub publication_year: i32,
    pub author_id: i64,
}

/// One row of the books ⋈ authors listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub book: DbBook,
    pub author: DbAuthor,
}

#[derive(Debug, FromRow)]
pub(crate) struct DbCatalogRow {
    pub book_id: i64,
    pub isbn: String,
    pub title: String,
    pub publication_year: i32,
    pub author_id: i64,
    pub author_name: String,
    pub birth_date: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
}

impl From<DbCatalogRow> for CatalogEntry {
    fn from(row: DbCatalogRow) -> Self {
        Self {
            book: DbBook {
                id: row.book_id,
                isbn: row.isbn,
                title: row.title,
                publication_year: row.publication_year,
                author_id: row.author_id,
            },
            author: DbAuthor {
                id: row.author_id,
                name: row.author_name,
                birth_date: row.birth_date,
                date_of_death: row.date_of_death,
            },
        }
    }
}

/// Result of deleting a book. `removed_author` holds the author's name when the
/// book was the author's last one and the author row went with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub book_title: String,
    pub removed_author: Option<String>,
}
