//! Core library for tagver.
//!
//! Reads a git repository (never writes to it), finds the nearest reachable
//! tag and the distance from it, and hands that to the encoder in
//! [`tagver_schema`] to get a version code and name.
//!
//! ```no_run
//! use std::path::Path;
//! use tagver_core::{Config, derive_at};
//!
//! let version = derive_at(Path::new("."), &Config::default())?;
//! println!("{} ({})", version.name, version.code);
//! # Ok::<(), tagver_core::VersionError>(())
//! ```

pub mod config;
pub mod describe;
pub mod error;
pub mod history;
pub mod output;

pub use config::{CONFIG_FILE, Config};
pub use describe::{derive, derive_at, describe};
pub use error::VersionError;
pub use history::{GitHistory, History, TagSelection};
pub use output::OutputFormat;

pub use tagver_schema::{CommitId, DescribeResult, Version, VersionCode, VersionName};
