use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Movie, MovieId, SearchPage, SearchQuery},
    services::providers::CatalogProvider,
};

/// Genres offered for browsing and as favorite-genre choices
pub const GENRES: [&str; 20] = [
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Music",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Sport",
    "Thriller",
    "War",
    "Western",
];

/// Number of featured IDs used when browsing a genre without samples
const UNKNOWN_GENRE_FALLBACK: usize = 5;

/// Curated ID lists the catalog hands out without searching
#[derive(Debug, Clone)]
pub struct CatalogSeeds {
    /// Representative IDs per genre, keyed by exact genre name
    pub genre_samples: HashMap<String, Vec<MovieId>>,
    /// Generally featured IDs, also the recommendation fallback pool
    pub featured: Vec<MovieId>,
    /// Recent releases
    pub latest: Vec<MovieId>,
}

fn ids(raw: &[&str]) -> Vec<MovieId> {
    raw.iter().copied().map(MovieId::from).collect()
}

impl Default for CatalogSeeds {
    fn default() -> Self {
        let genre_samples = [
            ("Action", ["tt0468569", "tt0133093", "tt10366206", "tt0848228", "tt4154796"]),
            ("Comedy", ["tt0110912", "tt0109830", "tt0382932", "tt1517268", "tt0325980"]),
            ("Drama", ["tt0111161", "tt0068646", "tt0137523", "tt5537002", "tt0120689"]),
            ("Sci-Fi", ["tt1375666", "tt0816692", "tt0133093", "tt0088763", "tt0076759"]),
            ("Horror", ["tt0081505", "tt1457767", "tt0078748", "tt0054215", "tt7784604"]),
            ("Romance", ["tt0338013", "tt0332280", "tt0118799", "tt0099348", "tt0095953"]),
            ("Thriller", ["tt0114369", "tt0102926", "tt0169547", "tt0482571", "tt0144084"]),
            ("Animation", ["tt0245429", "tt2380307", "tt9362722", "tt6718170", "tt0910970"]),
        ]
        .into_iter()
        .map(|(genre, samples)| (genre.to_string(), ids(&samples)))
        .collect();

        Self {
            genre_samples,
            featured: ids(&[
                "tt1375666", // Inception
                "tt0816692", // Interstellar
                "tt0468569", // The Dark Knight
                "tt0133093", // The Matrix
                "tt0111161", // The Shawshank Redemption
                "tt0068646", // The Godfather
                "tt0167260", // LOTR: The Return of the King
                "tt0110912", // Pulp Fiction
                "tt0109830", // Forrest Gump
                "tt0137523", // Fight Club
                "tt0120737", // LOTR: The Fellowship of the Ring
                "tt0080684", // The Empire Strikes Back
                "tt0099685", // Goodfellas
                "tt0073486", // One Flew Over the Cuckoo's Nest
                "tt0114369", // Se7en
                "tt0102926", // The Silence of the Lambs
                "tt0038650", // It's a Wonderful Life
                "tt0120815", // Saving Private Ryan
                "tt0245429", // Spirited Away
                "tt0047478", // Seven Samurai
            ]),
            latest: ids(&[
                "tt1517268",  // Barbie
                "tt15398776", // Oppenheimer
                "tt9362722",  // Spider-Man: Across the Spider-Verse
                "tt6718170",  // The Super Mario Bros. Movie
                "tt5537002",  // Killers of the Flower Moon
                "tt14998742", // Napoleon
                "tt14230458", // Poor Things
                "tt15239678", // Dune: Part Two
                "tt10366206", // John Wick: Chapter 4
                "tt11389872", // Guardians of the Galaxy Vol. 3
            ]),
        }
    }
}

impl CatalogSeeds {
    /// Sample IDs for a genre, empty when the genre has none
    pub fn samples_for(&self, genre: &str) -> &[MovieId] {
        self.genre_samples
            .get(genre)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Catalog access layer: a provider plus the curated seed lists
///
/// Cheap to clone; every clone shares the same provider.
#[derive(Clone)]
pub struct Catalog {
    provider: Arc<dyn CatalogProvider>,
    seeds: Arc<CatalogSeeds>,
}

impl Catalog {
    pub fn new(provider: Arc<dyn CatalogProvider>, seeds: CatalogSeeds) -> Self {
        Self {
            provider,
            seeds: Arc::new(seeds),
        }
    }

    pub fn seeds(&self) -> &CatalogSeeds {
        &self.seeds
    }

    pub async fn search_titles(&self, query: &SearchQuery) -> AppResult<SearchPage> {
        self.provider.search_titles(query).await
    }

    pub async fn get_by_id(&self, id: &MovieId) -> Option<Movie> {
        self.provider.get_by_id(id).await
    }

    /// Fetches many records concurrently, one task per ID
    ///
    /// Waits for the whole batch. Unresolved IDs are dropped, so the result may
    /// be shorter than `ids`; resolved records keep the order of `ids`.
    pub async fn get_many_by_id(&self, ids: &[MovieId]) -> Vec<Movie> {
        if ids.is_empty() {
            return Vec::new();
        }

        let mut tasks = Vec::with_capacity(ids.len());

        for id in ids {
            let provider = Arc::clone(&self.provider);
            let id = id.clone();
            let task = tokio::spawn(async move { provider.get_by_id(&id).await });
            tasks.push(task);
        }

        let mut movies = Vec::with_capacity(tasks.len());
        let mut unresolved = 0;

        for task in tasks {
            match task.await {
                Ok(Some(movie)) => movies.push(movie),
                Ok(None) => unresolved += 1,
                Err(e) => {
                    tracing::error!(error = %e, "Catalog lookup task failed");
                    unresolved += 1;
                }
            }
        }

        if unresolved > 0 {
            tracing::warn!(
                requested = ids.len(),
                resolved = movies.len(),
                unresolved = unresolved,
                provider = self.provider.name(),
                "Partial catalog batch"
            );
        } else {
            tracing::debug!(
                requested = ids.len(),
                provider = self.provider.name(),
                "Catalog batch resolved"
            );
        }

        movies
    }

    /// Sample movies for a genre, or the first few featured movies for an unknown genre
    pub async fn by_genre(&self, genre: &str) -> Vec<Movie> {
        let samples = self.seeds.samples_for(genre);
        if samples.is_empty() {
            let fallback = UNKNOWN_GENRE_FALLBACK.min(self.seeds.featured.len());
            return self.get_many_by_id(&self.seeds.featured[..fallback]).await;
        }
        self.get_many_by_id(samples).await
    }

    pub async fn featured(&self) -> Vec<Movie> {
        self.get_many_by_id(&self.seeds.featured).await
    }

    pub async fn latest(&self) -> Vec<Movie> {
        self.get_many_by_id(&self.seeds.latest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{movie, FixtureProvider};
    use std::collections::HashSet;

    fn catalog_with(ids: &[&str]) -> (Catalog, Arc<FixtureProvider>) {
        let provider = Arc::new(FixtureProvider::new(ids.iter().map(|id| movie(id)).collect()));
        let catalog = Catalog::new(provider.clone(), CatalogSeeds::default());
        (catalog, provider)
    }

    #[test]
    fn test_default_seeds_shape() {
        let seeds = CatalogSeeds::default();
        assert_eq!(seeds.featured.len(), 20);
        assert_eq!(seeds.latest.len(), 10);
        assert_eq!(seeds.genre_samples.len(), 8);
        assert!(seeds.genre_samples.values().all(|s| s.len() == 5));

        let unique: HashSet<_> = seeds.featured.iter().collect();
        assert_eq!(unique.len(), seeds.featured.len());
    }

    #[test]
    fn test_samples_for_matches_genre_name_exactly() {
        let seeds = CatalogSeeds::default();
        assert_eq!(seeds.samples_for("Sci-Fi").len(), 5);
        assert!(seeds.samples_for("Western").is_empty());
        assert!(seeds.samples_for("sci-fi").is_empty());
    }

    #[test]
    fn test_sampled_genres_are_known_genres() {
        let seeds = CatalogSeeds::default();
        assert!(seeds.genre_samples.keys().all(|g| GENRES.contains(&g.as_str())));
    }

    #[tokio::test]
    async fn test_get_many_by_id_drops_unresolved_and_keeps_order() {
        let (catalog, _) = catalog_with(&["a", "c", "e"]);
        let ids: Vec<MovieId> = ["e", "b", "a", "d", "c"].into_iter().map(MovieId::from).collect();

        let movies = catalog.get_many_by_id(&ids).await;
        let got: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();

        assert_eq!(got, vec!["e", "a", "c"]);
    }

    #[tokio::test]
    async fn test_get_many_by_id_empty_input_makes_no_lookups() {
        let (catalog, provider) = catalog_with(&["a"]);
        assert!(catalog.get_many_by_id(&[]).await.is_empty());
        assert!(provider.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_by_genre_unknown_uses_first_featured() {
        let (catalog, provider) = catalog_with(&["tt1375666", "tt0816692"]);

        let movies = catalog.by_genre("Western").await;

        assert_eq!(movies.len(), 2);
        let looked_up: HashSet<MovieId> = provider.lookups().into_iter().collect();
        let expected: HashSet<MovieId> = catalog.seeds().featured[..5].iter().cloned().collect();
        assert_eq!(looked_up, expected);
    }

    #[tokio::test]
    async fn test_latest_fetches_latest_seed_list() {
        let (catalog, provider) = catalog_with(&["tt15398776"]);

        let movies = catalog.latest().await;

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, MovieId::from("tt15398776"));
        assert_eq!(provider.lookups().len(), 10);
    }
}
