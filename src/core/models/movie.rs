//! Movie model

use super::ClassRatingSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The per-class rating sets recorded for one movie, keyed by class label
/// (e.g., "7A") in first-seen order.
///
/// Serializes transparently as the label map, so a movie appears in the
/// history file as `{"7A": {...}, "7B": {...}}` and a movie registered but
/// never rated as `{}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Movie {
    /// Class label -> that class's rating set for this movie
    pub classes: IndexMap<String, ClassRatingSet>,
}

impl Movie {
    /// Create a movie with no ratings
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: IndexMap::new(),
        }
    }

    /// The rating set for `label`, if that class has rated this movie
    #[must_use]
    pub fn class(&self, label: &str) -> Option<&ClassRatingSet> {
        self.classes.get(label)
    }

    /// Class labels in first-seen order
    pub fn class_labels(&self) -> impl Iterator<Item = &String> {
        self.classes.keys()
    }

    /// Whether no class has rated this movie
    #[must_use]
    pub fn is_unrated(&self) -> bool {
        self.classes.is_empty()
    }

    /// Total ratings across all classes
    #[must_use]
    pub fn rating_count(&self) -> usize {
        self.classes.values().map(ClassRatingSet::len).sum()
    }
}

impl Default for Movie {
    fn default() -> Self {
        Self::new()
    }
}
