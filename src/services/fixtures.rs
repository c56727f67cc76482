//! In-memory catalog provider and movie builders shared by service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId, SearchPage, SearchQuery},
    services::providers::CatalogProvider,
};

/// Serves a fixed set of records and records every lookup it receives
pub(crate) struct FixtureProvider {
    movies: HashMap<MovieId, Movie>,
    lookups: Mutex<Vec<MovieId>>,
}

impl FixtureProvider {
    pub(crate) fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: movies.into_iter().map(|m| (m.id.clone(), m)).collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn lookups(&self) -> Vec<MovieId> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CatalogProvider for FixtureProvider {
    async fn search_titles(&self, query: &SearchQuery) -> AppResult<SearchPage> {
        if query.query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }
        let needle = query.query.to_lowercase();
        let mut results: Vec<Movie> = self
            .movies
            .values()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        results.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(SearchPage {
            total_count: results.len().to_string(),
            results,
            ok: true,
            error: None,
        })
    }

    async fn get_by_id(&self, id: &MovieId) -> Option<Movie> {
        self.lookups.lock().unwrap().push(id.clone());
        self.movies.get(id).cloned()
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

/// Fluent setters for building test records
pub(crate) trait MovieBuilder {
    fn with_genres(self, genres: &[&str]) -> Self;
    fn with_directors(self, directors: &[&str]) -> Self;
    fn with_actors(self, actors: &[&str]) -> Self;
    fn with_rating(self, rating: f64) -> Self;
    fn with_year(self, year: i32) -> Self;
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl MovieBuilder for Movie {
    fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = owned(genres);
        self
    }

    fn with_directors(mut self, directors: &[&str]) -> Self {
        self.directors = owned(directors);
        self
    }

    fn with_actors(mut self, actors: &[&str]) -> Self {
        self.actors = owned(actors);
        self
    }

    fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// Bare record titled after its ID
pub(crate) fn movie(id: &str) -> Movie {
    Movie::new(id, format!("Movie {id}"))
}
