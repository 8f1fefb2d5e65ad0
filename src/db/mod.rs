//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `create.rs`: insert payloads
//! - `query.rs`: catalog listing filter and ordering
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `actor.rs`: the actor that owns the pool, and its handle

pub mod actor;
pub mod create;
pub mod models;
pub mod query;
pub mod schema;

pub use create::{AuthorCreate, BookCreate};
pub use models::{CatalogEntry, DbAuthor, DbBook, DeleteOutcome};
pub use query::{CatalogQuery, SortOrder};
pub use schema::SQLITE_INIT;

pub use actor::{DbActorHandle, spawn};
