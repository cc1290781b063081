// src/lib.rs

//! Faculty Directory Library
//!
//! Loads a campus faculty dataset, enriches each row with derived
//! attributes and serves filtered, paginated views of it.

pub mod app;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
