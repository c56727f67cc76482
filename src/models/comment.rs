use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MovieId;
use crate::error::{AppError, AppResult};

const ANONYMOUS_AUTHOR: &str = "Anonymous";
const AVATAR_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// A user review left on a movie page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: String,
    pub movie_id: MovieId,
    pub author: String,
    pub content: String,
    /// Star rating, 1 to 5
    pub rating: u8,
    pub timestamp: DateTime<Utc>,
    pub avatar: Option<String>,
}

/// Payload for posting a review
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub author: Option<String>,
    pub content: String,
    pub rating: u8,
}

impl Comment {
    /// Validates `new` and builds a comment stamped with the current time
    pub fn create(movie_id: MovieId, new: NewComment) -> AppResult<Self> {
        let content = new.content.trim();
        if content.is_empty() {
            return Err(AppError::InvalidInput(
                "Comment content cannot be empty".to_string(),
            ));
        }
        if !(1..=5).contains(&new.rating) {
            return Err(AppError::InvalidInput(format!(
                "Rating must be between 1 and 5, got {}",
                new.rating
            )));
        }

        let author = new
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR)
            .to_string();

        Ok(Self {
            id: format!("comment_{}", Uuid::new_v4()),
            movie_id,
            avatar: Some(format!("{}?seed={}", AVATAR_URL, author)),
            author,
            content: content.to_string(),
            rating: new.rating,
            timestamp: Utc::now(),
        })
    }
}
