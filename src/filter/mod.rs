pub mod engine;

pub use engine::filter_catalog;
