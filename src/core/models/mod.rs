//! Data models for `cineclass`

pub mod class_set;
pub mod movie;
pub mod rating;

pub use class_set::ClassRatingSet;
pub use movie::Movie;
pub use rating::Rating;
