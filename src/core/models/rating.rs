//! Student rating model

use serde::{Deserialize, Serialize};

/// One student's score for a movie, recorded under a class.
///
/// Serialized with the history file's field names (`nome`, `nota`), which
/// predate this crate and are kept for compatibility with existing files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Student name (e.g., "Ana"); not required to be unique within a class
    #[serde(rename = "nome")]
    pub name: String,

    /// Score given by the student, within `MIN_SCORE..=MAX_SCORE`
    #[serde(rename = "nota")]
    pub score: u8,
}

impl Rating {
    /// Lowest accepted score
    pub const MIN_SCORE: u8 = 1;

    /// Highest accepted score
    pub const MAX_SCORE: u8 = 8;

    /// Create a new rating
    ///
    /// # Arguments
    /// * `name` - Student name
    /// * `score` - Score; callers validate the range with [`Self::score_in_range`]
    #[must_use]
    pub const fn new(name: String, score: u8) -> Self {
        Self { name, score }
    }

    /// Whether `score` lies within the accepted range
    #[must_use]
    pub const fn score_in_range(score: u8) -> bool {
        score >= Self::MIN_SCORE && score <= Self::MAX_SCORE
    }
}
