//! Core module for `cineclass`: the rating store, its models, and the
//! persistence and rendering built around it

pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod report;
pub mod store;

/// Returns the current version of the `cineclass` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
