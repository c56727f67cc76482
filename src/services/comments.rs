use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{Comment, MovieId, NewComment},
};

/// In-memory review store, keyed by movie
#[derive(Debug, Default)]
pub struct CommentBook {
    by_movie: HashMap<MovieId, Vec<Comment>>,
}

impl CommentBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a review, newest first
    pub fn add(&mut self, movie_id: MovieId, new: NewComment) -> AppResult<Comment> {
        let comment = Comment::create(movie_id.clone(), new)?;

        self.by_movie
            .entry(movie_id)
            .or_default()
            .insert(0, comment.clone());

        tracing::info!(
            comment_id = %comment.id,
            movie_id = %comment.movie_id,
            rating = comment.rating,
            "Comment added"
        );

        Ok(comment)
    }

    /// Reviews for one movie, newest first
    pub fn for_movie(&self, movie_id: &MovieId) -> Vec<Comment> {
        let mut comments = self.by_movie.get(movie_id).cloned().unwrap_or_default();
        comments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        comments
    }

    /// Removes a review by ID, returning whether it existed
    pub fn delete(&mut self, comment_id: &str) -> bool {
        for (movie_id, comments) in self.by_movie.iter_mut() {
            if let Some(pos) = comments.iter().position(|c| c.id == comment_id) {
                comments.remove(pos);
                tracing::info!(comment_id = %comment_id, movie_id = %movie_id, "Comment deleted");
                return true;
            }
        }
        false
    }

    pub fn len(&self) -> usize {
        self.by_movie.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
