mod catalog;

pub use catalog::CatalogError;
