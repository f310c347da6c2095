//! quizmerge-core — Question bank scanning and JSON store merging.
//!
//! This crate turns loosely formatted plain-text question banks and answer
//! keys into structured records, and appends the new, unique ones to a JSON
//! question store with stable identifiers.

pub mod answer_scanner;
pub mod config;
pub mod error;
pub mod merger;
pub mod model;
pub mod question_scanner;
pub mod store;
pub mod text;
