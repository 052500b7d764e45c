pub mod api_docs;

pub use api_docs::{Catalog, CatalogSnapshot, Category, Endpoint, HttpMethod, JSON_CONTENT_TYPE};
