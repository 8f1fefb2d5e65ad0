pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod views;

pub use error::CatalogError;
