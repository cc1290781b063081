//! Pipeline entry points for directory operations.
//!
//! - `bootstrap`: Load the dataset once at startup, degrading on failure
//! - `load_directory`: Fetch, enrich and summarize a dataset

pub mod load;

pub use load::{DatasetSource, FileSource, HttpSource, bootstrap, load_directory, source_for};
