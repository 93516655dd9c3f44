//! The rating store: movies, the classes that rated them, and every
//! student score, with class averages kept current on each mutation

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::error::{StoreError, StoreResult};
use super::models::{ClassRatingSet, Movie, Rating};

/// Cascade behavior for a movie whose last rating was just deleted.
///
/// Deleting a rating always prunes a class set that ends up empty. Whether
/// the movie entry itself survives that cascade is a policy choice: history
/// files written by earlier tools dropped the movie too, while a registry
/// front end keeps registered movies alive until they are removed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrunePolicy {
    /// Drop a movie as soon as the delete cascade leaves it with no classes
    #[default]
    PruneEmptyMovies,
    /// Keep an emptied movie until [`RatingStore::remove_movie`] is called
    KeepEmptyMovies,
}

/// In-memory state of the whole rating system.
///
/// Movies are keyed by name in first-seen order; each movie holds its class
/// rating sets, also in first-seen order. All mutations go through the
/// methods here, which maintain three guarantees:
///
/// - every stored score lies within [`Rating::MIN_SCORE`]..=[`Rating::MAX_SCORE`]
/// - a class average always equals the 2-decimal-rounded mean of the class's
///   current scores
/// - no empty class set survives a rating deletion
///
/// Failed operations leave the store untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStore {
    /// Movie name -> movie, in registration/first-rated order
    movies: IndexMap<String, Movie>,

    /// Cascade behavior for movies emptied by rating deletion
    policy: PrunePolicy,
}

impl RatingStore {
    /// Create an empty store with the default prune policy
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(PrunePolicy::default())
    }

    /// Create an empty store with an explicit prune policy
    #[must_use]
    pub fn with_policy(policy: PrunePolicy) -> Self {
        Self {
            movies: IndexMap::new(),
            policy,
        }
    }

    /// The active prune policy
    #[must_use]
    pub const fn policy(&self) -> PrunePolicy {
        self.policy
    }

    /// Change the prune policy. Loaded stores start with the default; this
    /// only affects future deletions, nothing is re-pruned retroactively.
    pub fn set_policy(&mut self, policy: PrunePolicy) {
        self.policy = policy;
    }

    /// Number of movies currently tracked
    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the store tracks no movies at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Register a movie before any class has rated it.
    ///
    /// The name is trimmed first and becomes the lookup key. A registered
    /// movie shows up in listings and in the history file as an entry with
    /// no classes.
    ///
    /// # Errors
    /// `InvalidName` when the trimmed name is empty, `AlreadyExists` when a
    /// movie with this name is already tracked.
    pub fn register_movie(&mut self, name: &str) -> StoreResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidName);
        }
        if self.movies.contains_key(name) {
            return Err(StoreError::AlreadyExists {
                name: name.to_string(),
            });
        }
        self.movies.insert(name.to_string(), Movie::new());
        Ok(())
    }

    /// Remove a movie and everything recorded under it, returning the
    /// removed subtree. Remaining movies keep their relative order.
    ///
    /// # Errors
    /// `NotFound` when no movie has this name.
    pub fn remove_movie(&mut self, name: &str) -> StoreResult<Movie> {
        self.movies
            .shift_remove(name)
            .ok_or_else(|| StoreError::movie_not_found(name))
    }

    /// Record one student's score for a movie under a class.
    ///
    /// The movie entry and the class set are created on first use, so rating
    /// an unregistered movie is allowed and registers it implicitly. Callers
    /// that want a registry-style "movie must exist" rule enforce it before
    /// calling (the interactive menu picks from the registered list). The
    /// class average is refreshed before returning.
    ///
    /// # Errors
    /// `InvalidScore` when `score` is out of range; nothing is created or
    /// modified in that case, not even the movie entry.
    pub fn add_rating(
        &mut self,
        movie: &str,
        class_label: &str,
        student: &str,
        score: u8,
    ) -> StoreResult<()> {
        if !Rating::score_in_range(score) {
            return Err(StoreError::InvalidScore { score });
        }
        let set = self
            .movies
            .entry(movie.to_string())
            .or_default()
            .classes
            .entry(class_label.to_string())
            .or_default();
        set.push(Rating::new(student.to_string(), score));
        Ok(())
    }

    /// Update the name and/or score of the rating at `index` within one
    /// class's rating list. `None` leaves a field unchanged.
    ///
    /// The update is atomic: validation happens up front, and on any error
    /// neither field is touched. In particular an out-of-range score does
    /// not apply a pending name change.
    ///
    /// # Errors
    /// `InvalidScore` for an out-of-range score, `NotFound` for an unknown
    /// movie or class, `IndexOutOfRange` when `index` is past the end of the
    /// class's rating list.
    pub fn edit_rating(
        &mut self,
        movie: &str,
        class_label: &str,
        index: usize,
        new_name: Option<&str>,
        new_score: Option<u8>,
    ) -> StoreResult<()> {
        if let Some(score) = new_score {
            if !Rating::score_in_range(score) {
                return Err(StoreError::InvalidScore { score });
            }
        }
        let set = self.class_set_mut(movie, class_label)?;
        let len = set.len();
        let Some(rating) = set.ratings.get_mut(index) else {
            return Err(StoreError::IndexOutOfRange { index, len });
        };
        if let Some(name) = new_name {
            rating.name = name.to_string();
        }
        if let Some(score) = new_score {
            rating.score = score;
        }
        set.recompute_average();
        Ok(())
    }

    /// Delete and return the rating at `index` within one class's rating
    /// list. Later ratings shift down one position.
    ///
    /// A class set emptied by the deletion is pruned immediately. Whether an
    /// emptied movie is pruned too follows the store's [`PrunePolicy`];
    /// movies that never had ratings are not affected either way.
    ///
    /// # Errors
    /// `NotFound` for an unknown movie or class, `IndexOutOfRange` when
    /// `index` is past the end of the class's rating list.
    pub fn delete_rating(
        &mut self,
        movie: &str,
        class_label: &str,
        index: usize,
    ) -> StoreResult<Rating> {
        let prune_movie = self.policy == PrunePolicy::PruneEmptyMovies;
        let movie_entry = self
            .movies
            .get_mut(movie)
            .ok_or_else(|| StoreError::movie_not_found(movie))?;
        let set = movie_entry
            .classes
            .get_mut(class_label)
            .ok_or_else(|| StoreError::class_not_found(class_label))?;
        let len = set.len();
        let removed = set
            .remove(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        let class_now_empty = set.is_empty();

        if class_now_empty {
            movie_entry.classes.shift_remove(class_label);
            if movie_entry.is_unrated() && prune_movie {
                self.movies.shift_remove(movie);
            }
        }
        Ok(removed)
    }

    /// Movie names in first-seen order
    #[must_use]
    pub fn list_movies(&self) -> Vec<&str> {
        self.movies.keys().map(String::as_str).collect()
    }

    /// The movie entry for `name`, if tracked
    #[must_use]
    pub fn movie(&self, name: &str) -> Option<&Movie> {
        self.movies.get(name)
    }

    /// Read-only view of the whole movie -> class -> ratings tree
    #[must_use]
    pub const fn history(&self) -> &IndexMap<String, Movie> {
        &self.movies
    }

    /// Total ratings across every movie and class
    #[must_use]
    pub fn rating_count(&self) -> usize {
        self.movies.values().map(Movie::rating_count).sum()
    }

    fn class_set_mut(&mut self, movie: &str, class_label: &str) -> StoreResult<&mut ClassRatingSet> {
        let movie_entry = self
            .movies
            .get_mut(movie)
            .ok_or_else(|| StoreError::movie_not_found(movie))?;
        movie_entry
            .classes
            .get_mut(class_label)
            .ok_or_else(|| StoreError::class_not_found(class_label))
    }
}

impl Default for RatingStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A store serializes as the bare movie map, matching the history files the
/// original tooling wrote. The prune policy is runtime configuration and
/// never persisted; loaded stores start with the default.
impl Serialize for RatingStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.movies.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RatingStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::deserialize(deserializer).map(|movies| Self {
            movies,
            policy: PrunePolicy::default(),
        })
    }
}
