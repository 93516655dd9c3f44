//! List command handler

use logger::error;

use cineclass::config::Config;
use cineclass::history::HistoryFile;

/// Print the registered movies in first-seen order, one per line
pub fn run(config: &Config) {
    let history = HistoryFile::new(config.history_path());
    match history.load() {
        Ok(store) => {
            let movies = store.list_movies();
            if movies.is_empty() {
                println!("No movies registered yet.");
                return;
            }
            for (i, name) in movies.iter().enumerate() {
                println!("{}. {name}", i + 1);
            }
        }
        Err(err) => {
            error!("Failed to load history {}: {err}", history.path().display());
            eprintln!("✗ Failed to load {}: {err}", history.path().display());
        }
    }
}
