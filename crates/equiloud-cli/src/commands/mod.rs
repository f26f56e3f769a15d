//! CLI subcommands.

pub mod analyze;
pub mod grid;
pub mod render;
