pub mod catalog;
pub mod comments;
pub mod providers;
pub mod recommendations;
pub mod similarity;

#[cfg(test)]
pub(crate) mod fixtures;

pub use catalog::{Catalog, CatalogSeeds, GENRES};
pub use comments::CommentBook;
pub use providers::{CatalogProvider, OmdbProvider};
pub use recommendations::RecommendationEngine;
pub use similarity::similarity;
