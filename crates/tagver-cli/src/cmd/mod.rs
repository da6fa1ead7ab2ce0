//! Subcommand implementations

pub mod code;
pub mod completions;
pub mod describe;
pub mod name;
pub mod show;
