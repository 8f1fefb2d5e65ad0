//! SQL DDL for initializing the database schema.
//! SQLite-first design; there is no migration step, tables are created when absent.

/// SQLite schema includes:
/// - `authors` table (one row per author, dates as `YYYY-MM-DD`)
/// - `books` table (each row owned by exactly one author; removed with its author)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Authors
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS authors (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT NOT NULL,
    birth_date TEXT NOT NULL, -- YYYY-MM-DD
    date_of_death TEXT NULL -- YYYY-MM-DD
);

CREATE INDEX IF NOT EXISTS idx_authors_name ON authors(name);

-- ---------------------------------------------------------------------------
-- Books
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY NOT NULL,
    isbn TEXT NOT NULL,
    title TEXT NOT NULL,
    publication_year INTEGER NOT NULL,
    author_id INTEGER NOT NULL REFERENCES authors(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_books_author_id ON books(author_id);
"#;
