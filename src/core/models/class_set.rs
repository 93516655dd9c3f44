//! Class rating set model

use super::Rating;
use serde::{Deserialize, Serialize};

/// The ratings one class ("série") has recorded for one movie, together with
/// the class average.
///
/// The average is stored, not computed on read, because the history file
/// carries it under the `media` key. Every mutation goes through methods that
/// refresh it, so a serialized set is never stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRatingSet {
    /// Ratings in insertion order; a rating's position is its edit/delete address
    #[serde(rename = "alunos")]
    pub ratings: Vec<Rating>,

    /// Mean of all scores rounded to 2 decimals, `0.0` while empty
    #[serde(rename = "media")]
    pub average: f64,
}

impl ClassRatingSet {
    /// Create an empty set
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ratings: Vec::new(),
            average: 0.0,
        }
    }

    /// Number of ratings in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Whether the set holds no ratings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Append a rating and refresh the average
    pub fn push(&mut self, rating: Rating) {
        self.ratings.push(rating);
        self.recompute_average();
    }

    /// Remove and return the rating at `index`, refreshing the average.
    /// Later ratings shift down one position. Returns `None` when `index`
    /// is out of range.
    pub fn remove(&mut self, index: usize) -> Option<Rating> {
        if index >= self.ratings.len() {
            return None;
        }
        let removed = self.ratings.remove(index);
        self.recompute_average();
        Some(removed)
    }

    /// Recompute the average from scratch.
    ///
    /// Always a full pass over the current scores. Patching the previous
    /// value incrementally would accumulate float error across edits and
    /// deletes, so the stored average is never derived from itself.
    pub fn recompute_average(&mut self) {
        self.average = if self.ratings.is_empty() {
            0.0
        } else {
            let sum: u32 = self.ratings.iter().map(|r| u32::from(r.score)).sum();
            round_half_even(f64::from(sum) / self.ratings.len() as f64)
        };
    }
}

/// Round `mean` to 2 decimals, sending an exact half-hundredth tie to the
/// even hundredth. Existing history files carry `media` values rounded this
/// way, so recomputation has to reproduce it.
///
/// With integer scores the only means that land exactly on a half-hundredth
/// are eighth-valued (1.125, 1.375, ...), which scale to an exact x.5 under
/// `* 100.0`; the `==` below relies on that exactness. Everything else
/// rounds to the nearest hundredth.
#[allow(clippy::float_cmp)]
fn round_half_even(mean: f64) -> f64 {
    let scaled = mean * 100.0;
    let floor = scaled.floor();
    let hundredths = if scaled - floor == 0.5 {
        if floor % 2.0 == 0.0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        scaled.round()
    };
    hundredths / 100.0
}

impl Default for ClassRatingSet {
    fn default() -> Self {
        Self::new()
    }
}
