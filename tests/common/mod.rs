use std::collections::HashMap;
use std::sync::Arc;

use axum_test::TestServer;

use cinelist_api::{
    api::{create_router, AppState},
    error::{AppError, AppResult},
    models::{Movie, MovieId, SearchPage, SearchQuery},
    services::{CatalogProvider, CatalogSeeds},
};

/// Catalog provider answering from a fixed in-memory set
pub struct StaticCatalog {
    movies: HashMap<MovieId, Movie>,
}

impl StaticCatalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: movies.into_iter().map(|m| (m.id.clone(), m)).collect(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for StaticCatalog {
    async fn search_titles(&self, query: &SearchQuery) -> AppResult<SearchPage> {
        let needle = query.query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let mut results: Vec<Movie> = self
            .movies
            .values()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        results.sort_by(|a, b| a.id.cmp(&b.id));

        if results.is_empty() {
            return Ok(SearchPage::failed("Movie not found!".to_string()));
        }

        Ok(SearchPage {
            total_count: results.len().to_string(),
            results,
            ok: true,
            error: None,
        })
    }

    async fn get_by_id(&self, id: &MovieId) -> Option<Movie> {
        self.movies.get(id).cloned()
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

pub fn movie(
    id: &str,
    title: &str,
    genres: &[&str],
    directors: &[&str],
    rating: Option<f64>,
    year: Option<i32>,
) -> Movie {
    let mut m = Movie::new(id, title);
    m.genres = genres.iter().map(|g| g.to_string()).collect();
    m.directors = directors.iter().map(|d| d.to_string()).collect();
    m.rating = rating;
    m.year = year;
    m
}

/// A small catalog: two sci-fi films, two crime films and a comedy
pub fn sample_movies() -> Vec<Movie> {
    vec![
        movie("tt0133093", "The Matrix", &["Action", "Sci-Fi"], &["Lana Wachowski", "Lilly Wachowski"], Some(8.7), Some(1999)),
        movie("tt1375666", "Inception", &["Action", "Adventure", "Sci-Fi"], &["Christopher Nolan"], Some(8.8), Some(2010)),
        movie("tt0114369", "Se7en", &["Crime", "Drama", "Mystery"], &["David Fincher"], Some(8.6), Some(1995)),
        movie("tt0137523", "Fight Club", &["Drama"], &["David Fincher"], Some(8.8), Some(1999)),
        movie("tt0109830", "Forrest Gump", &["Drama", "Romance"], &["Robert Zemeckis"], Some(8.8), Some(1994)),
        movie("tt0382932", "Ratatouille", &["Animation", "Comedy"], &["Brad Bird"], Some(8.1), Some(2007)),
    ]
}

fn ids(raw: &[&str]) -> Vec<MovieId> {
    raw.iter().copied().map(MovieId::from).collect()
}

pub fn sample_seeds() -> CatalogSeeds {
    CatalogSeeds {
        genre_samples: [
            ("Sci-Fi", ids(&["tt0133093", "tt1375666"])),
            ("Drama", ids(&["tt0114369", "tt0137523", "tt0109830"])),
        ]
        .into_iter()
        .map(|(genre, samples)| (genre.to_string(), samples))
        .collect(),
        featured: ids(&[
            "tt0382932",
            "tt0109830",
            "tt0114369",
            "tt0133093",
            "tt9999999",
        ]),
        latest: ids(&["tt1375666", "tt0382932"]),
    }
}

pub fn create_test_server() -> TestServer {
    let provider = Arc::new(StaticCatalog::new(sample_movies()));
    let state = AppState::with_seeds(provider, sample_seeds());
    TestServer::new(create_router(state)).unwrap()
}
