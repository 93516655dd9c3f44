//! Report command handler
//!
//! Renders the rating history as text or markdown, to stdout or to a file.

use logger::{error, info};

use cineclass::config::Config;
use cineclass::history::HistoryFile;
use cineclass::report::{self, ReportFormat};
use std::path::Path;
use std::str::FromStr;

/// Run the report command.
///
/// # Arguments
/// * `output_file` - Optional output path; stdout when omitted
/// * `format_str` - Report format name (text, markdown)
/// * `config` - Configuration pointing at the history file
pub fn run(output_file: Option<&Path>, format_str: &str, config: &Config) {
    if let Err(err) = generate_report(output_file, format_str, config) {
        error!("Report generation failed: {err}");
        eprintln!("{err}");
    }
}

fn generate_report(
    output_file: Option<&Path>,
    format_str: &str,
    config: &Config,
) -> Result<(), String> {
    let format = ReportFormat::from_str(format_str)
        .map_err(|e| format!("✗ {e} (expected: text or markdown)"))?;

    let history = HistoryFile::new(config.history_path());
    let store = history
        .load()
        .map_err(|e| format!("✗ Failed to load {}: {e}", history.path().display()))?;

    info!("Rendering {format} report for {} movies", store.len());
    let content = report::render(&store, format);

    match output_file {
        Some(path) => {
            std::fs::write(path, &content)
                .map_err(|e| format!("✗ Failed to write {}: {e}", path.display()))?;
            println!("✓ Report written: {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
