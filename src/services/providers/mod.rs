/// Movie catalog provider abstraction
///
/// A provider answers title searches and single-record lookups against some
/// movie database. Batch lookups, seed lists and fan-out live in
/// [`crate::services::catalog::Catalog`], which wraps a provider.
use crate::{
    error::AppResult,
    models::{Movie, MovieId, SearchPage, SearchQuery},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for movie catalog providers
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search for titles by name
    ///
    /// An empty query is an `InvalidInput` error. An upstream "no results" is
    /// not an error: it comes back as a page with `ok == false`.
    async fn search_titles(&self, query: &SearchQuery) -> AppResult<SearchPage>;

    /// Fetch the full record for one catalog ID
    ///
    /// `None` covers both "not found" and "lookup failed"; providers log the
    /// failure themselves and callers must treat the two identically.
    async fn get_by_id(&self, id: &MovieId) -> Option<Movie>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
