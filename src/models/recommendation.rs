use serde::{Deserialize, Serialize};

use super::Movie;

/// A scored, explained recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub movie: Movie,
    /// Blended score: genre preference, rating and similarity to viewing history
    pub score: f64,
    /// One or two human-readable reasons, most important first
    pub reasons: Vec<String>,
}
