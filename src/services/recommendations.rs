use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::iter;
use std::time::Instant;

use crate::{
    models::{Movie, MovieId, Recommendation, UserPreferences},
    services::{
        catalog::Catalog,
        similarity::{common_director, similarity},
    },
};

/// Candidates fetched per `recommend` call
pub const RECOMMENDATION_POOL_CAP: usize = 20;
/// Candidates fetched per `similar_movies` call
pub const SIMILAR_POOL_CAP: usize = 15;
/// Most recent history entries compared against candidates
pub const VIEWED_SAMPLE: usize = 5;

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;
pub const DEFAULT_SIMILAR_LIMIT: usize = 6;

pub const FALLBACK_REASON: &str = "Popular recommendation";

const GENRE_MATCH_POINTS: f64 = 15.0;
const RATING_MULTIPLIER: f64 = 3.0;
const HISTORY_SIMILARITY_WEIGHT: f64 = 0.3;

const MAX_REASONS: usize = 2;
const HIGH_RATING: f64 = 8.0;
/// Only the most recent viewed records can produce a "Similar to" reason
const SIMILAR_REASON_SAMPLE: usize = 3;
const SIMILAR_REASON_THRESHOLD: f64 = 50.0;

/// Content-based recommendation engine
///
/// Holds no user state; each call works from the preferences snapshot it is given.
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Catalog,
}

impl RecommendationEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Ranks candidates for a user and explains each pick
    ///
    /// Candidates come from the sample lists of the user's favorite genres
    /// followed by the featured list. Anything in `exclude_ids` or the user's
    /// viewing history is left out. Equal scores keep candidate-pool order.
    pub async fn recommend(
        &self,
        preferences: &UserPreferences,
        exclude_ids: &[MovieId],
        limit: usize,
    ) -> Vec<Recommendation> {
        let start = Instant::now();

        let excluded: HashSet<&MovieId> = exclude_ids
            .iter()
            .chain(preferences.recently_viewed.iter())
            .collect();

        let seeds = self.catalog.seeds();
        let groups = preferences
            .favorite_genres
            .iter()
            .map(|genre| seeds.samples_for(genre))
            .chain(iter::once(seeds.featured.as_slice()));

        let mut pool = candidate_pool(groups, |id| excluded.contains(id));
        let pool_size = pool.len();
        pool.truncate(RECOMMENDATION_POOL_CAP);

        if pool.is_empty() || limit == 0 {
            tracing::info!(pool_size = pool_size, limit = limit, "No recommendation candidates");
            return Vec::new();
        }

        let candidates = self.fetch_in_order(&pool).await;

        let viewed_ids: Vec<MovieId> = preferences
            .recently_viewed
            .iter()
            .take(VIEWED_SAMPLE)
            .cloned()
            .collect();
        let viewed = self.fetch_in_order(&viewed_ids).await;

        let favorites: Vec<String> = preferences
            .favorite_genres
            .iter()
            .map(|g| g.to_lowercase())
            .collect();

        let mut recommendations: Vec<Recommendation> = candidates
            .into_iter()
            .map(|movie| {
                let score = blended_score(&movie, &favorites, &viewed);
                let reasons = reasons(&movie, &favorites, &viewed);
                Recommendation {
                    movie,
                    score,
                    reasons,
                }
            })
            .collect();

        // sort_by is stable, so ties keep pool order
        recommendations.sort_by(|a, b| descending(a.score, b.score));
        recommendations.truncate(limit);

        tracing::info!(
            pool_size = pool_size,
            fetched = pool.len(),
            viewed = viewed.len(),
            returned = recommendations.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Recommendations generated"
        );

        recommendations
    }

    /// Movies most similar to `reference`, best first
    ///
    /// Candidates come from the sample lists of the reference's own genres
    /// followed by the featured list; the reference itself is never returned.
    pub async fn similar_movies(&self, reference: &Movie, limit: usize) -> Vec<Movie> {
        let seeds = self.catalog.seeds();
        let groups = reference
            .genres
            .iter()
            .map(|genre| seeds.samples_for(genre))
            .chain(iter::once(seeds.featured.as_slice()));

        let mut pool = candidate_pool(groups, |id| *id == reference.id);
        pool.truncate(SIMILAR_POOL_CAP);

        if pool.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(Movie, f64)> = self
            .fetch_in_order(&pool)
            .await
            .into_iter()
            .map(|candidate| {
                let score = similarity(reference, &candidate);
                (candidate, score)
            })
            .collect();

        scored.sort_by(|a, b| descending(a.1, b.1));
        scored.truncate(limit);

        tracing::debug!(
            reference = %reference.id,
            candidates = pool.len(),
            returned = scored.len(),
            "Similar movies ranked"
        );

        scored.into_iter().map(|(movie, _)| movie).collect()
    }

    /// Batch-fetches `ids` and returns at most one record per requested ID, in `ids` order.
    /// Records for IDs that were not requested are discarded.
    async fn fetch_in_order(&self, ids: &[MovieId]) -> Vec<Movie> {
        let position: HashMap<&MovieId, usize> =
            ids.iter().enumerate().map(|(i, id)| (id, i)).collect();

        let mut slots: Vec<Option<Movie>> = vec![None; ids.len()];
        for movie in self.catalog.get_many_by_id(ids).await {
            match position.get(&movie.id) {
                Some(&i) if slots[i].is_none() => slots[i] = Some(movie),
                Some(_) => {}
                None => {
                    tracing::debug!(movie_id = %movie.id, "Discarding record that was not requested");
                }
            }
        }

        slots.into_iter().flatten().collect()
    }
}

/// Concatenates ID groups, keeping the first occurrence of each ID and skipping excluded ones
fn candidate_pool<'a>(
    groups: impl IntoIterator<Item = &'a [MovieId]>,
    is_excluded: impl Fn(&MovieId) -> bool,
) -> Vec<MovieId> {
    let mut seen = HashSet::new();
    groups
        .into_iter()
        .flatten()
        .filter(|id| seen.insert(*id))
        .filter(|id| !is_excluded(id))
        .cloned()
        .collect()
}

/// Orders higher scores first; NaN never occurs but compares equal
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Whether `genre` contains any favorite genre (`favorites` already lowercased)
fn matches_favorite(genre: &str, favorites: &[String]) -> bool {
    let genre = genre.to_lowercase();
    favorites.iter().any(|favorite| genre.contains(favorite.as_str()))
}

fn blended_score(movie: &Movie, favorites: &[String], viewed: &[Movie]) -> f64 {
    let genre_matches = movie
        .genres
        .iter()
        .filter(|genre| matches_favorite(genre, favorites))
        .count();

    let rating = movie.rating.map_or(0.0, |r| r * RATING_MULTIPLIER);

    let history: f64 = viewed
        .iter()
        .map(|seen| similarity(movie, seen) * HISTORY_SIMILARITY_WEIGHT)
        .sum();

    genre_matches as f64 * GENRE_MATCH_POINTS + rating + history
}

/// Up to two explanations, checked in fixed priority order
fn reasons(movie: &Movie, favorites: &[String], viewed: &[Movie]) -> Vec<String> {
    let mut reasons = Vec::with_capacity(MAX_REASONS);

    if let Some(genre) = movie
        .genres
        .iter()
        .find(|genre| matches_favorite(genre, favorites))
    {
        reasons.push(format!("Matches your favorite genre: {}", genre));
    }

    if let Some(rating) = movie.rating.filter(|r| *r >= HIGH_RATING) {
        reasons.push(format!("Highly rated: {:.1}/10", rating));
    }

    if reasons.len() < MAX_REASONS {
        if let Some(seen) = viewed
            .iter()
            .take(SIMILAR_REASON_SAMPLE)
            .find(|seen| similarity(movie, seen) > SIMILAR_REASON_THRESHOLD)
        {
            reasons.push(format!("Similar to \"{}\"", seen.title));
        }
    }

    if reasons.len() < MAX_REASONS {
        if let Some(director) = viewed.iter().find_map(|seen| common_director(movie, seen)) {
            reasons.push(format!("From director {}", director));
        }
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }

    reasons
}
