//! CLI command handlers.

pub mod config;
pub mod fonts;
pub mod generate;
pub mod render;
