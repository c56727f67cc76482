/// OMDb API provider
///
/// Title search uses `?s=` (paged, optional type/year filters); detail lookups
/// use `?i=<imdb id>&plot=full`. OMDb reports "not found" in-band with
/// `"Response": "False"` and a 200 status, so both endpoints inspect the body
/// rather than relying on the HTTP status alone.
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{Movie, MovieId, OmdbMovie, OmdbSearchResponse, SearchPage, SearchQuery},
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const PROVIDER_NAME: &str = "omdb";

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
    cache_ttl: u64,
}

impl OmdbProvider {
    pub fn new(
        cache: Cache,
        api_key: String,
        api_url: String,
        cache_ttl: u64,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
            cache_ttl,
        })
    }

    /// Fetches one record from the API, bypassing the cache
    async fn fetch_movie(&self, id: &MovieId) -> AppResult<Movie> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("i", id.as_str()),
                ("plot", "full"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb returned status {}: {}",
                status, body
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let movie = self.parse_movie_response(id, body)?;

        tracing::debug!(
            movie_id = %id,
            title = %movie.title,
            provider = PROVIDER_NAME,
            "Movie details fetched"
        );

        Ok(movie)
    }

    fn parse_movie_response(&self, id: &MovieId, body: serde_json::Value) -> AppResult<Movie> {
        if body["Response"].as_str() == Some("False") {
            let reason = body["Error"].as_str().unwrap_or("Movie not found");
            return Err(AppError::NotFound(format!("{}: {}", id, reason)));
        }

        let raw: OmdbMovie = serde_json::from_value(body).map_err(|e| {
            AppError::ExternalApi(format!("Failed to parse OMDb movie {}: {}", id, e))
        })?;

        Ok(Movie::from(raw))
    }

    fn convert_search_response(&self, response: OmdbSearchResponse) -> SearchPage {
        if response.response != "True" {
            return SearchPage::failed(
                response
                    .error
                    .unwrap_or_else(|| "Unknown OMDb error".to_string()),
            );
        }

        SearchPage {
            results: response.search.into_iter().map(Movie::from).collect(),
            total_count: response.total_results.unwrap_or_else(|| "0".to_string()),
            ok: true,
            error: None,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for OmdbProvider {
    async fn search_titles(&self, query: &SearchQuery) -> AppResult<SearchPage> {
        let term = query.query.trim();
        if term.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        cached!(
            self.cache,
            CacheKey::MovieSearch(query.clone()),
            self.cache_ttl,
            async move {
                let page = query.page.max(1).to_string();
                let mut params = vec![
                    ("apikey", self.api_key.as_str()),
                    ("s", term),
                    ("page", page.as_str()),
                ];
                if let Some(media_type) = query.media_type {
                    params.push(("type", media_type.as_str()));
                }
                if let Some(year) = query.year.as_deref() {
                    params.push(("y", year));
                }

                let response = self
                    .http_client
                    .get(&self.api_url)
                    .query(&params)
                    .send()
                    .await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ExternalApi(format!(
                        "OMDb returned status {}: {}",
                        status, body
                    )));
                }

                let body: OmdbSearchResponse = response.json().await?;
                let page = self.convert_search_response(body);

                tracing::info!(
                    query = %term,
                    results = page.results.len(),
                    ok = page.ok,
                    provider = PROVIDER_NAME,
                    "Title search completed"
                );

                Ok(page)
            }
        )
    }

    async fn get_by_id(&self, id: &MovieId) -> Option<Movie> {
        if id.as_str().trim().is_empty() {
            return None;
        }

        let result: AppResult<Movie> = cached!(
            self.cache,
            CacheKey::MovieDetails(id.clone()),
            self.cache_ttl,
            self.fetch_movie(id)
        );

        match result {
            Ok(movie) => Some(movie),
            Err(AppError::NotFound(reason)) => {
                tracing::debug!(movie_id = %id, reason = %reason, provider = PROVIDER_NAME, "Movie not found");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, movie_id = %id, provider = PROVIDER_NAME, "Movie lookup failed");
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;
    use serde_json::json;

    async fn create_test_provider() -> OmdbProvider {
        let (cache, _handle) =
            Cache::new(redis::Client::open("redis://localhost:6379").unwrap()).await;

        OmdbProvider::new(
            cache,
            "test_key".to_string(),
            "http://test.local/".to_string(),
            60,
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_new_trims_trailing_slash() {
        let provider = create_test_provider().await;
        assert_eq!(provider.api_url, "http://test.local");
        assert_eq!(provider.name(), "omdb");
    }

    #[tokio::test]
    async fn test_parse_movie_response_success() {
        let provider = create_test_provider().await;
        let body = json!({
            "Title": "Se7en",
            "Year": "1995",
            "Genre": "Crime, Drama, Mystery",
            "Director": "David Fincher",
            "imdbRating": "8.6",
            "imdbID": "tt0114369",
            "Type": "movie",
            "Response": "True"
        });

        let movie = provider
            .parse_movie_response(&MovieId::from("tt0114369"), body)
            .unwrap();

        assert_eq!(movie.title, "Se7en");
        assert_eq!(movie.genres, vec!["Crime", "Drama", "Mystery"]);
        assert_eq!(movie.rating, Some(8.6));
    }

    #[tokio::test]
    async fn test_parse_movie_response_not_found() {
        let provider = create_test_provider().await;
        let body = json!({"Response": "False", "Error": "Incorrect IMDb ID."});

        let result = provider.parse_movie_response(&MovieId::from("tt_bad"), body);

        match result {
            Err(AppError::NotFound(msg)) => assert!(msg.contains("Incorrect IMDb ID.")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_movie_response_malformed_body() {
        let provider = create_test_provider().await;
        let body = json!({"Response": "True", "Year": "1995"});

        let result = provider.parse_movie_response(&MovieId::from("tt0114369"), body);
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[tokio::test]
    async fn test_convert_search_response_success() {
        let provider = create_test_provider().await;
        let response: OmdbSearchResponse = serde_json::from_value(json!({
            "Search": [
                {"Title": "Alien", "Year": "1979", "imdbID": "tt0078748", "Type": "movie", "Poster": "N/A"},
                {"Title": "Aliens", "Year": "1986", "imdbID": "tt0090605", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "142",
            "Response": "True"
        }))
        .unwrap();

        let page = provider.convert_search_response(response);

        assert!(page.ok);
        assert_eq!(page.total_count, "142");
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].year, Some(1986));
        assert_eq!(page.error, None);
    }

    #[tokio::test]
    async fn test_convert_search_response_failure() {
        let provider = create_test_provider().await;
        let response: OmdbSearchResponse =
            serde_json::from_value(json!({"Response": "False", "Error": "Too many results."}))
                .unwrap();

        let page = provider.convert_search_response(response);

        assert!(!page.ok);
        assert_eq!(page.total_count, "0");
        assert_eq!(page.error.as_deref(), Some("Too many results."));
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query() {
        let provider = create_test_provider().await;
        let query = SearchQuery {
            media_type: Some(MediaType::Series),
            ..SearchQuery::new("   ")
        };

        let result = provider.search_titles(&query).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_get_by_id_blank_id_is_none() {
        let provider = create_test_provider().await;
        assert_eq!(provider.get_by_id(&MovieId::from("")).await, None);
    }
}
