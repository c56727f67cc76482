use serde::{Deserialize, Serialize};

use super::MovieId;

/// Number of entries kept in the recently-viewed history
pub const RECENTLY_VIEWED_CAP: usize = 20;

/// UI color scheme preference
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// A single user's discovery preferences and viewing history
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    /// Favorite genres, in the order they were picked
    #[serde(default)]
    pub favorite_genres: Vec<String>,
    /// Viewed movie IDs, most recent first
    #[serde(default)]
    pub recently_viewed: Vec<MovieId>,
    #[serde(default)]
    pub watchlist: Vec<MovieId>,
    #[serde(default)]
    pub liked_movies: Vec<MovieId>,
    #[serde(default)]
    pub theme: Theme,
}

/// Removes `item` if present, appends it otherwise. Returns the new membership.
fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if let Some(pos) = items.iter().position(|existing| *existing == item) {
        items.remove(pos);
        false
    } else {
        items.push(item);
        true
    }
}

impl UserPreferences {
    /// Creates empty user preferences
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_watchlist(&mut self, movie_id: MovieId) -> bool {
        toggle(&mut self.watchlist, movie_id)
    }

    pub fn toggle_liked(&mut self, movie_id: MovieId) -> bool {
        toggle(&mut self.liked_movies, movie_id)
    }

    pub fn toggle_favorite_genre(&mut self, genre: String) -> bool {
        toggle(&mut self.favorite_genres, genre)
    }

    /// Moves `movie_id` to the front of the history, dropping the oldest entries past the cap
    pub fn add_to_recently_viewed(&mut self, movie_id: MovieId) {
        self.recently_viewed.retain(|id| *id != movie_id);
        self.recently_viewed.insert(0, movie_id);
        self.recently_viewed.truncate(RECENTLY_VIEWED_CAP);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn is_in_watchlist(&self, movie_id: &MovieId) -> bool {
        self.watchlist.contains(movie_id)
    }

    pub fn is_liked(&self, movie_id: &MovieId) -> bool {
        self.liked_movies.contains(movie_id)
    }

    pub fn is_genre_favorite(&self, genre: &str) -> bool {
        self.favorite_genres.iter().any(|g| g == genre)
    }
}
