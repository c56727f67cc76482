//! Pairwise content similarity between two movie records.
//!
//! The score is a weighted sum of five independent factors and lies in
//! `0.0..=100.0`. A factor only contributes when both records carry the
//! attribute; a missing attribute adds nothing rather than counting against
//! the pair.
//!
//! Genre overlap compares names case-insensitively, while director and actor
//! names must match exactly (case included).

use crate::models::Movie;

pub const GENRE_WEIGHT: f64 = 40.0;
pub const DIRECTOR_WEIGHT: f64 = 20.0;
pub const ACTOR_WEIGHT: f64 = 20.0;
pub const RATING_WEIGHT: f64 = 10.0;
pub const YEAR_WEIGHT: f64 = 10.0;

/// Points per shared actor, capped at [`ACTOR_WEIGHT`]
const POINTS_PER_SHARED_ACTOR: f64 = 5.0;

/// Rating difference at which rating closeness reaches zero
const RATING_SPAN: f64 = 10.0;

/// Year difference at which year closeness reaches zero
const YEAR_SPAN: f64 = 50.0;

/// Content similarity of `a` and `b`, between 0 and 100
pub fn similarity(a: &Movie, b: &Movie) -> f64 {
    genre_overlap(a, b)
        + shared_director(a, b)
        + shared_actors(a, b)
        + rating_closeness(a, b)
        + year_closeness(a, b)
}

/// First director of `a` that also directed `b`
pub fn common_director<'a>(a: &'a Movie, b: &Movie) -> Option<&'a str> {
    a.directors
        .iter()
        .find(|d| b.directors.contains(d))
        .map(String::as_str)
}

fn genre_overlap(a: &Movie, b: &Movie) -> f64 {
    if a.genres.is_empty() || b.genres.is_empty() {
        return 0.0;
    }

    let theirs: Vec<String> = b.genres.iter().map(|g| g.to_lowercase()).collect();
    let common = a
        .genres
        .iter()
        .filter(|g| theirs.contains(&g.to_lowercase()))
        .count();

    let denominator = a.genres.len().max(b.genres.len());
    common as f64 / denominator as f64 * GENRE_WEIGHT
}

fn shared_director(a: &Movie, b: &Movie) -> f64 {
    if common_director(a, b).is_some() {
        DIRECTOR_WEIGHT
    } else {
        0.0
    }
}

fn shared_actors(a: &Movie, b: &Movie) -> f64 {
    let common = a.actors.iter().filter(|actor| b.actors.contains(actor)).count();
    (common as f64 * POINTS_PER_SHARED_ACTOR).min(ACTOR_WEIGHT)
}

fn rating_closeness(a: &Movie, b: &Movie) -> f64 {
    match (a.rating, b.rating) {
        (Some(ra), Some(rb)) => closeness((ra - rb).abs(), RATING_SPAN) * RATING_WEIGHT,
        _ => 0.0,
    }
}

fn year_closeness(a: &Movie, b: &Movie) -> f64 {
    match (a.year, b.year) {
        (Some(ya), Some(yb)) => closeness(f64::from((ya - yb).abs()), YEAR_SPAN) * YEAR_WEIGHT,
        _ => 0.0,
    }
}

/// 1.0 for identical values, falling linearly to 0.0 at `span` apart
fn closeness(diff: f64, span: f64) -> f64 {
    (1.0 - diff / span).max(0.0)
}
