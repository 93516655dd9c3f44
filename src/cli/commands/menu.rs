//! Interactive menu command handler
//!
//! The menu owns every prompt and parse loop. It calls one store operation
//! per action and saves the full history after each successful change, so
//! quitting at any point loses nothing. Malformed numeric input is handled
//! here (score prompts re-ask, selections abort back to the menu); range
//! and lookup rules stay in the store and surface as its errors.

use std::io::{self, BufRead, Write};

use cineclass::config::Config;
use cineclass::history::HistoryFile;
use cineclass::models::Rating;
use cineclass::report;
use cineclass::store::RatingStore;
use logger::{debug, error, info};

/// Run the interactive menu session
pub fn run(config: &Config) {
    let history = HistoryFile::new(config.history_path());
    let mut store = match history.load() {
        Ok(store) => store,
        Err(err) => {
            error!("Failed to load history {}: {err}", history.path().display());
            eprintln!("✗ Failed to load {}: {err}", history.path().display());
            return;
        }
    };
    store.set_policy(config.prune_policy());
    info!(
        "Loaded {} movies ({} ratings) from {}",
        store.len(),
        store.rating_count(),
        history.path().display()
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print_menu();
        let Some(choice) = read_line(&mut input, "Choose an option: ") else {
            break;
        };
        match choice.as_str() {
            "1" => register_movie(&mut input, &mut store, &history),
            "2" => remove_movie(&mut input, &mut store, &history),
            "3" => add_rating(&mut input, &mut store, &history),
            "4" => print!("{}", report::render_text(&store)),
            "5" => edit_rating(&mut input, &mut store, &history),
            "6" => delete_rating(&mut input, &mut store, &history),
            "7" => print_movie_list(&store),
            "8" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("⚠ Invalid option, try again."),
        }
        println!();
    }
}

fn print_menu() {
    println!("=== MOVIE RATING MENU ===");
    println!("1. Register a movie");
    println!("2. Remove a movie");
    println!("3. Add a student rating");
    println!("4. Show rating history");
    println!("5. Edit a rating");
    println!("6. Delete a rating");
    println!("7. List movies");
    println!("8. Exit");
}

fn print_movie_list(store: &RatingStore) {
    let movies = store.list_movies();
    if movies.is_empty() {
        println!("⚠ No movies registered yet.");
        return;
    }
    println!("Movies:");
    for (i, name) in movies.iter().enumerate() {
        println!("  {}. {name}", i + 1);
    }
}

fn register_movie<R: BufRead>(input: &mut R, store: &mut RatingStore, history: &HistoryFile) {
    let Some(name) = read_nonempty(input, "Movie name: ") else {
        return;
    };
    match store.register_movie(&name) {
        Ok(()) => {
            println!("✓ Movie '{name}' registered!");
            persist(store, history);
        }
        Err(err) => println!("⚠ {err}"),
    }
}

fn remove_movie<R: BufRead>(input: &mut R, store: &mut RatingStore, history: &HistoryFile) {
    let Some(name) = select_movie(input, store) else {
        return;
    };
    match store.remove_movie(&name) {
        Ok(removed) => {
            println!(
                "✓ Movie '{name}' removed ({} ratings deleted).",
                removed.rating_count()
            );
            persist(store, history);
        }
        Err(err) => println!("⚠ {err}"),
    }
}

fn add_rating<R: BufRead>(input: &mut R, store: &mut RatingStore, history: &HistoryFile) {
    let Some(movie) = select_movie(input, store) else {
        return;
    };
    let Some(label) = read_nonempty(input, "Class (e.g., 7A): ") else {
        return;
    };
    let Some(student) = read_nonempty(input, "Student name: ") else {
        return;
    };
    let Some(score) = read_score(input) else {
        return;
    };
    match store.add_rating(&movie, &label, &student, score) {
        Ok(()) => {
            let average = class_average(store, &movie, &label);
            println!("✓ {student} rated '{movie}' {score} (class {label} average: {average:.2})");
            persist(store, history);
        }
        Err(err) => println!("⚠ {err}"),
    }
}

fn edit_rating<R: BufRead>(input: &mut R, store: &mut RatingStore, history: &HistoryFile) {
    let Some(movie) = select_movie(input, store) else {
        return;
    };
    let Some(label) = select_class(input, store, &movie) else {
        return;
    };
    let Some(index) = select_rating(input, store, &movie, &label) else {
        return;
    };
    let Some(current) = store
        .movie(&movie)
        .and_then(|m| m.class(&label))
        .and_then(|set| set.ratings.get(index))
        .cloned()
    else {
        return;
    };

    let Some(name) = read_line(input, &format!("New name (blank keeps '{}'): ", current.name))
    else {
        return;
    };
    let new_name = if name.is_empty() {
        None
    } else {
        Some(name.as_str())
    };
    let Some(new_score) = read_optional_score(input, current.score) else {
        return;
    };

    match store.edit_rating(&movie, &label, index, new_name, new_score) {
        Ok(()) => {
            let average = class_average(store, &movie, &label);
            println!("✓ Rating updated (class {label} average: {average:.2})");
            persist(store, history);
        }
        Err(err) => println!("⚠ {err}"),
    }
}

fn delete_rating<R: BufRead>(input: &mut R, store: &mut RatingStore, history: &HistoryFile) {
    let Some(movie) = select_movie(input, store) else {
        return;
    };
    let Some(label) = select_class(input, store, &movie) else {
        return;
    };
    let Some(index) = select_rating(input, store, &movie, &label) else {
        return;
    };

    match store.delete_rating(&movie, &label, index) {
        Ok(removed) => {
            println!("✓ Deleted {}'s rating ({}).", removed.name, removed.score);
            debug!("Store now tracks {} movies", store.len());
            persist(store, history);
        }
        Err(err) => println!("⚠ {err}"),
    }
}

/// Save the whole store, surfacing failures without dropping in-memory state
fn persist(store: &RatingStore, history: &HistoryFile) {
    if let Err(err) = history.save(store) {
        error!("Failed to save history {}: {err}", history.path().display());
        eprintln!("✗ Changes could not be saved: {err}");
    }
}

fn class_average(store: &RatingStore, movie: &str, label: &str) -> f64 {
    store
        .movie(movie)
        .and_then(|m| m.class(label))
        .map_or(0.0, |set| set.average)
}

/// Print `prompt`, read one line, and trim it. `None` means end of input.
fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Like [`read_line`] but re-asks until the trimmed line is non-empty
fn read_nonempty<R: BufRead>(input: &mut R, prompt: &str) -> Option<String> {
    loop {
        let line = read_line(input, prompt)?;
        if !line.is_empty() {
            return Some(line);
        }
        println!("⚠ A value is required.");
    }
}

/// Read a score, re-asking until it parses and lies in the accepted range
fn read_score<R: BufRead>(input: &mut R) -> Option<u8> {
    let prompt = format!("Score ({} to {}): ", Rating::MIN_SCORE, Rating::MAX_SCORE);
    loop {
        let line = read_line(input, &prompt)?;
        match line.parse::<u8>() {
            Ok(score) if Rating::score_in_range(score) => return Some(score),
            Ok(score) => println!("⚠ Score {score} is out of range, try again."),
            Err(_) => println!("⚠ Enter a whole number."),
        }
    }
}

/// Read an optional score for edits: blank keeps the current value, numbers
/// are passed through for the store to validate, anything else re-asks.
/// The outer `None` means end of input.
fn read_optional_score<R: BufRead>(input: &mut R, current: u8) -> Option<Option<u8>> {
    let prompt = format!("New score (blank keeps {current}): ");
    loop {
        let line = read_line(input, &prompt)?;
        if line.is_empty() {
            return Some(None);
        }
        match line.parse::<u8>() {
            Ok(score) => return Some(Some(score)),
            Err(_) => println!("⚠ Enter a whole number or leave blank."),
        }
    }
}

/// Show the numbered movie list and read a 1-based choice. An out-of-range
/// or non-numeric choice aborts back to the menu.
fn select_movie<R: BufRead>(input: &mut R, store: &RatingStore) -> Option<String> {
    let movies = store.list_movies();
    if movies.is_empty() {
        println!("⚠ No movies registered yet.");
        return None;
    }
    println!("Movies:");
    for (i, name) in movies.iter().enumerate() {
        println!("  {}. {name}", i + 1);
    }
    let choice = read_line(input, "Movie number: ")?;
    match choice.parse::<usize>() {
        Ok(n) if (1..=movies.len()).contains(&n) => Some(movies[n - 1].to_string()),
        _ => {
            println!("⚠ Invalid selection.");
            None
        }
    }
}

/// Show the numbered class list for `movie` and read a 1-based choice
fn select_class<R: BufRead>(input: &mut R, store: &RatingStore, movie: &str) -> Option<String> {
    let labels: Vec<&String> = store
        .movie(movie)
        .map(|m| m.class_labels().collect())
        .unwrap_or_default();
    if labels.is_empty() {
        println!("⚠ No ratings recorded for '{movie}' yet.");
        return None;
    }
    println!("Classes:");
    for (i, label) in labels.iter().enumerate() {
        println!("  {}. {label}", i + 1);
    }
    let choice = read_line(input, "Class number: ")?;
    match choice.parse::<usize>() {
        Ok(n) if (1..=labels.len()).contains(&n) => Some(labels[n - 1].clone()),
        _ => {
            println!("⚠ Invalid selection.");
            None
        }
    }
}

/// Show the numbered ratings for one class and read a 1-based choice,
/// returning the zero-based index the store operations expect
fn select_rating<R: BufRead>(
    input: &mut R,
    store: &RatingStore,
    movie: &str,
    label: &str,
) -> Option<usize> {
    let set = store.movie(movie).and_then(|m| m.class(label))?;
    println!("Ratings for '{movie}', class {label}:");
    for (i, rating) in set.ratings.iter().enumerate() {
        println!("  {}. {}: {}", i + 1, rating.name, rating.score);
    }
    let len = set.len();
    let choice = read_line(input, "Rating number: ")?;
    match choice.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => {
            println!("⚠ Invalid selection.");
            None
        }
    }
}
