pub mod access_log;
pub mod flash;
pub mod router;
pub mod routes;

pub use router::{CatalogState, catalog_router};
