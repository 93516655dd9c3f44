//! Crate-level smoke tests

use cineclass::history::HistoryFile;
use cineclass::report::{render, ReportFormat};
use cineclass::store::RatingStore;

#[test]
fn test_version_is_exposed() {
    let version = cineclass::get_version();
    assert!(!version.is_empty());
    assert!(version.split('.').count() >= 2);
}

#[test]
fn test_library_facade_covers_the_workflow() {
    // The happy path as library consumers see it: mutate, persist, report
    let dir = tempfile::tempdir().unwrap();
    let history = HistoryFile::new(dir.path().join("historico.json"));

    let mut store = RatingStore::new();
    store.add_rating("Matrix", "7A", "Ana", 8).unwrap();
    history.save(&store).unwrap();

    let loaded = history.load().unwrap();
    let report = render(&loaded, ReportFormat::Text);
    assert!(report.contains("Movie: Matrix"));
    assert!(report.contains("- Ana: 8"));
}
