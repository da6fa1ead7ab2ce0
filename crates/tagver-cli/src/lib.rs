//! tagver - version code and name from git tags
//!
//! Derives two values from the nearest `v<major>.<minor>` tag reachable from
//! HEAD:
//!
//! - a version code, `(major << 16) | (minor << 8) | distance`, that only
//!   ever goes up as commits and tags accumulate;
//! - a version name such as `1.0.r3.g23701cf`.
//!
//! The repository is only ever read.

#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]

pub mod cmd;
pub mod context;
pub mod ui;

pub use context::Context;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagver_core::OutputFormat;

/// Version string baked in by the build script.
pub const BUILD_VERSION: &str = env!("TAGVER_BUILD_NAME");

#[derive(Debug, Parser)]
#[command(name = "tagver")]
#[command(author, version = BUILD_VERSION, about = "Derive a monotonic version code and name from git tags")]
pub struct Cli {
    /// Repository to describe (any path inside it)
    #[arg(long, short = 'C', global = true, env = "TAGVER_REPO", default_value = ".")]
    pub repo: PathBuf,

    /// Configuration file (defaults to the nearest tagver.toml)
    #[arg(long, global = true, env = "TAGVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log describe details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the version code and name
    Show {
        /// Output format: text, json, env or cargo
        #[arg(long, short)]
        format: Option<OutputFormat>,
        /// Variable prefix for env and cargo formats
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Print only the version code
    Code,
    /// Print only the version name
    Name,
    /// Print the nearest tag, distance and full HEAD commit
    Describe,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
