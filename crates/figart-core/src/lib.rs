//! Core figart library (config, font lookup, banner generation).

pub mod catalog;
pub mod config;
pub mod escape;
pub mod fonts;
pub mod generator;
pub mod logging;
