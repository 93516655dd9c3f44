//! History report rendering
//!
//! Renders the stored movie/class/rating tree for people to read. The text
//! format is what the interactive menu prints; the markdown format produces
//! a document that renders well in GitHub and VS Code.

use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use super::store::RatingStore;

/// Supported report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text for the terminal
    Text,
    /// Markdown with one table per movie
    Markdown,
}

impl ReportFormat {
    /// Conventional file extension for this format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render the store in the requested format
#[must_use]
pub fn render(store: &RatingStore, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => render_text(store),
        ReportFormat::Markdown => render_markdown(store),
    }
}

/// Render the full history as terminal text.
///
/// Movies appear in first-seen order, then each class with its average and
/// its ratings in insertion order. The menu's "show history" option prints
/// exactly this.
#[must_use]
pub fn render_text(store: &RatingStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== RATING HISTORY ===");

    if store.is_empty() {
        let _ = writeln!(out, "\nNo ratings recorded yet.");
        return out;
    }

    for (movie_name, movie) in store.history() {
        let _ = writeln!(out, "\nMovie: {movie_name}");
        if movie.is_unrated() {
            let _ = writeln!(out, "  (registered, no ratings yet)");
            continue;
        }
        for (label, set) in &movie.classes {
            let _ = writeln!(out, "  Class {label} (average {:.2})", set.average);
            for rating in &set.ratings {
                let _ = writeln!(out, "    - {}: {}", rating.name, rating.score);
            }
        }
    }
    out
}

/// Render the full history as a markdown document with one table per movie.
#[must_use]
pub fn render_markdown(store: &RatingStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Rating History");

    if store.is_empty() {
        let _ = writeln!(out, "\nNo ratings recorded yet.");
        return out;
    }

    for (movie_name, movie) in store.history() {
        let _ = writeln!(out, "\n## {movie_name}");
        if movie.is_unrated() {
            let _ = writeln!(out, "\nRegistered, no ratings yet.");
            continue;
        }

        let _ = writeln!(out, "\n| Class | Ratings | Average |");
        out.push_str("|---|---|---|\n");
        for (label, set) in &movie.classes {
            let ratings_str: Vec<String> = set
                .ratings
                .iter()
                .map(|r| format!("{} ({})", r.name, r.score))
                .collect();
            let _ = writeln!(
                out,
                "| {label} | {} | {:.2} |",
                ratings_str.join(", "),
                set.average
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> RatingStore {
        let mut store = RatingStore::new();
        store.add_rating("Matrix", "7A", "Ana", 8).unwrap();
        store.add_rating("Matrix", "7A", "Bea", 6).unwrap();
        store.add_rating("Matrix", "7B", "Caio", 4).unwrap();
        store.register_movie("Divertida Mente").unwrap();
        store
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("TXT".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!(
            "markdown".parse::<ReportFormat>().unwrap(),
            ReportFormat::Markdown
        );
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_format_extension_and_display() {
        assert_eq!(ReportFormat::Text.extension(), "txt");
        assert_eq!(ReportFormat::Markdown.extension(), "md");
        assert_eq!(ReportFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_text_report_lists_everything() {
        let text = render_text(&sample_store());

        assert!(text.contains("Movie: Matrix"));
        assert!(text.contains("Class 7A (average 7.00)"));
        assert!(text.contains("    - Ana: 8"));
        assert!(text.contains("    - Bea: 6"));
        assert!(text.contains("Class 7B (average 4.00)"));
        assert!(text.contains("Movie: Divertida Mente"));
        assert!(text.contains("(registered, no ratings yet)"));
    }

    #[test]
    fn test_text_report_orders_movies_first_seen() {
        let text = render_text(&sample_store());
        let matrix = text.find("Movie: Matrix").unwrap();
        let inside_out = text.find("Movie: Divertida Mente").unwrap();
        assert!(matrix < inside_out);
    }

    #[test]
    fn test_empty_store_message() {
        let store = RatingStore::new();
        assert!(render_text(&store).contains("No ratings recorded yet."));
        assert!(render_markdown(&store).contains("No ratings recorded yet."));
    }

    #[test]
    fn test_markdown_report_tables() {
        let md = render_markdown(&sample_store());

        assert!(md.starts_with("# Rating History"));
        assert!(md.contains("## Matrix"));
        assert!(md.contains("| Class | Ratings | Average |"));
        assert!(md.contains("| 7A | Ana (8), Bea (6) | 7.00 |"));
        assert!(md.contains("| 7B | Caio (4) | 4.00 |"));
        assert!(md.contains("## Divertida Mente"));
        assert!(md.contains("Registered, no ratings yet."));
    }

    #[test]
    fn test_render_dispatches_by_format() {
        let store = sample_store();
        assert_eq!(render(&store, ReportFormat::Text), render_text(&store));
        assert_eq!(
            render(&store, ReportFormat::Markdown),
            render_markdown(&store)
        );
    }
}
