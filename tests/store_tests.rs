//! Integration tests for the rating store
//!
//! Walks the store through the same flows the interactive menu drives:
//! register, rate, edit, delete, and the prune cascade, checking averages
//! and the serialized history shape along the way.

use cineclass::error::StoreError;
use cineclass::store::{PrunePolicy, RatingStore};
use serde_json::json;

fn average(store: &RatingStore, movie: &str, class: &str) -> f64 {
    store
        .movie(movie)
        .expect("movie should exist")
        .classes
        .get(class)
        .expect("class should exist")
        .average
}

#[test]
fn test_full_rating_lifecycle() {
    let mut store = RatingStore::new();

    // One class rates one movie
    store.add_rating("Matrix", "7A", "Ana", 8).unwrap();
    store.add_rating("Matrix", "7A", "Bea", 6).unwrap();
    assert!((average(&store, "Matrix", "7A") - 7.0).abs() < f64::EPSILON);

    // Correcting Bea's score refreshes the average
    store
        .edit_rating("Matrix", "7A", 1, None, Some(2))
        .unwrap();
    assert!((average(&store, "Matrix", "7A") - 5.0).abs() < f64::EPSILON);

    // Removing Ana leaves Bea's score as the average
    let removed = store.delete_rating("Matrix", "7A", 0).unwrap();
    assert_eq!(removed.name, "Ana");
    assert_eq!(removed.score, 8);
    assert!((average(&store, "Matrix", "7A") - 2.0).abs() < f64::EPSILON);

    // Removing the last rating prunes the class and then the movie
    let removed = store.delete_rating("Matrix", "7A", 0).unwrap();
    assert_eq!(removed.name, "Bea");
    assert!(store.is_empty());
}

#[test]
fn test_register_then_rate() {
    let mut store = RatingStore::new();

    store.register_movie("Divertida Mente").unwrap();
    assert_eq!(store.list_movies(), vec!["Divertida Mente"]);
    assert!(store.movie("Divertida Mente").unwrap().is_unrated());

    store
        .add_rating("Divertida Mente", "6B", "Caio", 5)
        .unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.rating_count(), 1);
}

#[test]
fn test_register_rejects_duplicates_and_blank_names() {
    let mut store = RatingStore::new();

    store.register_movie("Matrix").unwrap();
    assert!(matches!(
        store.register_movie("Matrix"),
        Err(StoreError::AlreadyExists { .. })
    ));
    // Names are trimmed before the uniqueness check
    assert!(matches!(
        store.register_movie("  Matrix  "),
        Err(StoreError::AlreadyExists { .. })
    ));
    assert!(matches!(
        store.register_movie("   "),
        Err(StoreError::InvalidName)
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_scores_outside_range_are_rejected() {
    let mut store = RatingStore::new();

    assert!(matches!(
        store.add_rating("Matrix", "7A", "Ana", 0),
        Err(StoreError::InvalidScore { score: 0 })
    ));
    assert!(matches!(
        store.add_rating("Matrix", "7A", "Ana", 9),
        Err(StoreError::InvalidScore { score: 9 })
    ));
    // A rejected add must not leave a half-created movie behind
    assert!(store.is_empty());

    store.add_rating("Matrix", "7A", "Ana", 1).unwrap();
    store.add_rating("Matrix", "7A", "Bea", 8).unwrap();
    assert_eq!(store.rating_count(), 2);
}

#[test]
fn test_edit_is_atomic_when_score_is_invalid() {
    let mut store = RatingStore::new();
    store.add_rating("Matrix", "7A", "Ana", 8).unwrap();

    // Name and score are submitted together; a bad score must not apply
    // the name change either
    let err = store
        .edit_rating("Matrix", "7A", 0, Some("Anna"), Some(42))
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidScore { score: 42 }));

    let rating = &store.movie("Matrix").unwrap().classes["7A"].ratings[0];
    assert_eq!(rating.name, "Ana");
    assert_eq!(rating.score, 8);
}

#[test]
fn test_edit_errors_leave_store_untouched() {
    let mut store = RatingStore::new();
    store.add_rating("Matrix", "7A", "Ana", 8).unwrap();
    let before = store.clone();

    assert!(matches!(
        store.edit_rating("Avatar", "7A", 0, Some("X"), None),
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        store.edit_rating("Matrix", "9C", 0, Some("X"), None),
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        store.edit_rating("Matrix", "7A", 5, Some("X"), None),
        Err(StoreError::IndexOutOfRange { index: 5, len: 1 })
    ));
    assert_eq!(store, before);
}

#[test]
fn test_delete_shifts_later_ratings_down() {
    let mut store = RatingStore::new();
    store.add_rating("Matrix", "7A", "Ana", 8).unwrap();
    store.add_rating("Matrix", "7A", "Bea", 6).unwrap();
    store.add_rating("Matrix", "7A", "Caio", 4).unwrap();

    store.delete_rating("Matrix", "7A", 0).unwrap();

    let ratings = &store.movie("Matrix").unwrap().classes["7A"].ratings;
    assert_eq!(ratings[0].name, "Bea");
    assert_eq!(ratings[1].name, "Caio");
    assert!((average(&store, "Matrix", "7A") - 5.0).abs() < f64::EPSILON);
}

#[test]
fn test_delete_prunes_class_but_keeps_other_classes() {
    let mut store = RatingStore::new();
    store.add_rating("Matrix", "7A", "Ana", 8).unwrap();
    store.add_rating("Matrix", "8B", "Caio", 4).unwrap();

    store.delete_rating("Matrix", "7A", 0).unwrap();

    let movie = store.movie("Matrix").unwrap();
    assert!(!movie.classes.contains_key("7A"));
    assert!(movie.classes.contains_key("8B"));
}

#[test]
fn test_keep_empty_movies_policy_stops_the_cascade() {
    let mut store = RatingStore::with_policy(PrunePolicy::KeepEmptyMovies);
    store.add_rating("Matrix", "7A", "Ana", 8).unwrap();

    store.delete_rating("Matrix", "7A", 0).unwrap();

    // The emptied class is still pruned, the movie survives
    let movie = store.movie("Matrix").expect("movie should survive");
    assert!(movie.is_unrated());
    assert_eq!(store.list_movies(), vec!["Matrix"]);
}

#[test]
fn test_registered_movie_survives_unrelated_deletes() {
    let mut store = RatingStore::new();
    store.register_movie("Matrix").unwrap();
    store.add_rating("Avatar", "7A", "Ana", 8).unwrap();

    store.delete_rating("Avatar", "7A", 0).unwrap();

    // Only the movie the cascade ran under can be pruned
    assert_eq!(store.list_movies(), vec!["Matrix"]);
}

#[test]
fn test_listing_preserves_first_seen_order() {
    let mut store = RatingStore::new();
    store.add_rating("Matrix", "7A", "Ana", 8).unwrap();
    store.register_movie("Avatar").unwrap();
    store.add_rating("Up", "6B", "Bea", 5).unwrap();

    assert_eq!(store.list_movies(), vec!["Matrix", "Avatar", "Up"]);

    store.remove_movie("Avatar").unwrap();
    assert_eq!(store.list_movies(), vec!["Matrix", "Up"]);

    // Re-adding a removed movie places it at the end
    store.register_movie("Avatar").unwrap();
    assert_eq!(store.list_movies(), vec!["Matrix", "Up", "Avatar"]);
}

#[test]
fn test_remove_movie_returns_the_subtree() {
    let mut store = RatingStore::new();
    store.add_rating("Matrix", "7A", "Ana", 8).unwrap();
    store.add_rating("Matrix", "8B", "Bea", 6).unwrap();

    let movie = store.remove_movie("Matrix").unwrap();
    assert_eq!(movie.classes.len(), 2);
    assert!(store.is_empty());

    assert!(matches!(
        store.remove_movie("Matrix"),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn test_history_serializes_with_wire_field_names() {
    let mut store = RatingStore::new();
    store.add_rating("Matrix", "7A", "Ana", 8).unwrap();
    store.add_rating("Matrix", "7A", "Bea", 6).unwrap();
    store.register_movie("Avatar").unwrap();

    let value = serde_json::to_value(&store).unwrap();
    assert_eq!(
        value,
        json!({
            "Matrix": {
                "7A": {
                    "alunos": [
                        {"nome": "Ana", "nota": 8},
                        {"nome": "Bea", "nota": 6}
                    ],
                    "media": 7.0
                }
            },
            "Avatar": {}
        })
    );
}

#[test]
fn test_average_tie_persists_the_even_hundredth() {
    let mut store = RatingStore::new();
    for (i, score) in [1, 1, 1, 1, 1, 1, 1, 2].into_iter().enumerate() {
        store
            .add_rating("Matrix", "7A", &format!("Aluno {}", i + 1), score)
            .unwrap();
    }

    // 9 / 8 = 1.125 lands exactly on a half-hundredth; the even side wins
    assert!((average(&store, "Matrix", "7A") - 1.12).abs() < f64::EPSILON);

    let value = serde_json::to_value(&store).unwrap();
    assert_eq!(value["Matrix"]["7A"]["media"], json!(1.12));
}

#[test]
fn test_round_trip_preserves_order_and_averages() {
    let mut store = RatingStore::new();
    store.add_rating("Matrix", "7A", "Ana", 8).unwrap();
    store.add_rating("Matrix", "8B", "Bea", 6).unwrap();
    store.add_rating("Avatar", "7A", "Caio", 3).unwrap();

    let serialized = serde_json::to_string(&store).unwrap();
    let loaded: RatingStore = serde_json::from_str(&serialized).unwrap();

    assert_eq!(loaded, store);
    assert_eq!(loaded.list_movies(), vec!["Matrix", "Avatar"]);
    assert!((average(&loaded, "Avatar", "7A") - 3.0).abs() < f64::EPSILON);
}
