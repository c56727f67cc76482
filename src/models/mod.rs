use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod comment;
pub mod recommendation;
pub mod user_preferences;

pub use comment::{Comment, NewComment};
pub use recommendation::Recommendation;
pub use user_preferences::{Theme, UserPreferences};

/// Sentinel OMDb uses for "no information"
const NOT_AVAILABLE: &str = "N/A";

/// Separator OMDb uses for multi-valued attributes
const LIST_SEPARATOR: &str = ", ";

/// Catalog identifier for a movie (an IMDb ID such as "tt1375666")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MovieId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
        }
    }
}

/// Rating from a single external source (e.g. Rotten Tomatoes)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalRating {
    pub source: String,
    pub value: String,
}

/// A movie record as returned to the client and consumed by the scorer
///
/// Multi-valued attributes are split once at ingestion; numeric attributes
/// that are missing or unparseable are `None`, never zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i32>,
    pub media_type: MediaType,
    pub poster: Option<String>,
    pub plot: Option<String>,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub writers: Vec<String>,
    pub actors: Vec<String>,
    pub runtime: Option<String>,
    pub rating: Option<f64>,
    pub released: Option<String>,
    pub rated: Option<String>,
    pub awards: Option<String>,
    pub box_office: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub metascore: Option<String>,
    pub production: Option<String>,
    pub ratings: Vec<ExternalRating>,
}

impl Movie {
    /// Creates a bare record with only the identifying fields set
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: None,
            media_type: MediaType::Movie,
            poster: None,
            plot: None,
            genres: Vec::new(),
            directors: Vec::new(),
            writers: Vec::new(),
            actors: Vec::new(),
            runtime: None,
            rating: None,
            released: None,
            rated: None,
            awards: None,
            box_office: None,
            country: None,
            language: None,
            metascore: None,
            production: None,
            ratings: Vec::new(),
        }
    }
}

// ============================================================================
// Search Types
// ============================================================================

/// Parameters for a title search against the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub media_type: Option<MediaType>,
    #[serde(default)]
    pub year: Option<String>,
}

fn default_page() -> u32 {
    1
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: default_page(),
            media_type: None,
            year: None,
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchPage {
    pub results: Vec<Movie>,
    pub total_count: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchPage {
    /// An unsuccessful page carrying the upstream error message
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            total_count: "0".to_string(),
            ok: false,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw movie record from the OMDb API
///
/// Search results only carry the first five fields; detail lookups carry all.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(rename = "Type", default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub writer: Option<String>,
    #[serde(default)]
    pub actors: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub rated: Option<String>,
    #[serde(default)]
    pub awards: Option<String>,
    #[serde(default)]
    pub box_office: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub metascore: Option<String>,
    #[serde(default)]
    pub production: Option<String>,
    #[serde(default)]
    pub ratings: Vec<OmdbRating>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbRating {
    pub source: String,
    pub value: String,
}

/// Raw search response from the OMDb API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbSearchResponse {
    #[serde(default)]
    pub search: Vec<OmdbMovie>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Drops missing, blank and "N/A" values
fn known(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != NOT_AVAILABLE
    })
}

/// Splits a delimited OMDb attribute into its parts
fn split_list(value: Option<String>) -> Vec<String> {
    known(value)
        .map(|v| {
            v.split(LIST_SEPARATOR)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parses the leading numeric prefix of a value ("7.9", "2010–2013")
fn leading_number<T: std::str::FromStr>(value: &str, allow_fraction: bool) -> Option<T> {
    let trimmed = value.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in trimmed.char_indices() {
        let accepted = c.is_ascii_digit()
            || (i == 0 && (c == '-' || c == '+'))
            || (allow_fraction && c == '.' && !seen_dot);
        if !accepted {
            break;
        }
        if c == '.' {
            seen_dot = true;
        }
        end = i + c.len_utf8();
    }
    trimmed[..end].trim_end_matches('.').parse().ok()
}

fn parse_rating(value: Option<String>) -> Option<f64> {
    known(value)
        .and_then(|v| leading_number::<f64>(&v, true))
        .filter(|r| r.is_finite())
}

fn parse_year(value: Option<String>) -> Option<i32> {
    known(value).and_then(|v| leading_number::<i32>(&v, false))
}

impl From<OmdbMovie> for Movie {
    fn from(raw: OmdbMovie) -> Self {
        let media_type = match raw.media_type.as_deref() {
            Some("series") => MediaType::Series,
            Some("episode") => MediaType::Episode,
            _ => MediaType::Movie,
        };

        Movie {
            id: MovieId(raw.imdb_id),
            title: raw.title,
            year: parse_year(raw.year),
            media_type,
            poster: known(raw.poster),
            plot: known(raw.plot),
            genres: split_list(raw.genre),
            directors: split_list(raw.director),
            writers: split_list(raw.writer),
            actors: split_list(raw.actors),
            runtime: known(raw.runtime),
            rating: parse_rating(raw.imdb_rating),
            released: known(raw.released),
            rated: known(raw.rated),
            awards: known(raw.awards),
            box_office: known(raw.box_office),
            country: known(raw.country),
            language: known(raw.language),
            metascore: known(raw.metascore),
            production: known(raw.production),
            ratings: raw
                .ratings
                .into_iter()
                .map(|r| ExternalRating {
                    source: r.source,
                    value: r.value,
                })
                .collect(),
        }
    }
}
