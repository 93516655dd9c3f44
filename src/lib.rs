//! Shared library for `cineclass`
//! Contains the rating store, its persistence, and report rendering used by the CLI

pub mod core;

pub use self::core::*;
