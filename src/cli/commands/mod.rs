//! CLI command handlers for `cineclass`.
//!
//! Each subcommand is implemented in its own submodule: the interactive
//! menu, the report printer, the movie listing, and config management.

pub mod config;
pub mod list;
pub mod menu;
pub mod report;
