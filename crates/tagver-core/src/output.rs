//! Machine-readable renderings of a derived [`Version`].

use crate::history::GitHistory;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tagver_schema::Version;

/// How `show` prints a version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Labelled, human-oriented lines.
    #[default]
    Text,
    /// A JSON object with the code, name and describe triple.
    Json,
    /// `PREFIX_CODE=...` / `PREFIX_NAME=...` lines.
    Env,
    /// `cargo:rustc-env=...` build-script instructions.
    Cargo,
}

impl OutputFormat {
    /// Every accepted spelling, for help text and error messages.
    pub const NAMES: [&'static str; 4] = ["text", "json", "env", "cargo"];
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Env => "env",
            OutputFormat::Cargo => "cargo",
        })
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "env" => Ok(Self::Env),
            "cargo" => Ok(Self::Cargo),
            _ => Err(format!(
                "unknown format '{s}' (expected one of: {})",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// `<prefix>_CODE=<code>` and `<prefix>_NAME=<name>`.
pub fn env_lines(version: &Version, prefix: &str) -> Vec<String> {
    vec![
        format!("{prefix}_CODE={}", version.code),
        format!("{prefix}_NAME={}", version.name),
    ]
}

/// Build-script instructions exporting the version and watching `rerun` paths.
pub fn cargo_instructions(version: &Version, prefix: &str, rerun: &[PathBuf]) -> Vec<String> {
    cargo_lines(env_lines(version, prefix), rerun)
}

/// Build-script instructions for when no version could be derived.
///
/// Exports code `0` with `name`, reports `reason` as a cargo warning, and
/// still watches `rerun` so fixing the tags triggers a rebuild.
pub fn fallback_instructions(
    prefix: &str,
    name: &str,
    reason: &str,
    rerun: &[PathBuf],
) -> Vec<String> {
    let mut lines = vec![format!(
        "cargo:warning=could not derive version from git ({reason}), using {name}"
    )];
    lines.extend(cargo_lines(
        vec![format!("{prefix}_CODE=0"), format!("{prefix}_NAME={name}")],
        rerun,
    ));
    lines
}

fn cargo_lines(env: Vec<String>, rerun: &[PathBuf]) -> Vec<String> {
    env.into_iter()
        .map(|line| format!("cargo:rustc-env={line}"))
        .chain(
            rerun
                .iter()
                .map(|path| format!("cargo:rerun-if-changed={}", path.display())),
        )
        .collect()
}

/// Pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn json(version: &Version) -> Result<String> {
    Ok(serde_json::to_string_pretty(version)?)
}

/// Files under the git directory whose change means the version may change.
///
/// Covers HEAD moving, the checked-out branch advancing, and tags being
/// added (loose or packed). HEAD is per worktree; refs live in the common
/// directory. Only existing paths are returned.
pub fn rerun_paths(history: &GitHistory) -> Vec<PathBuf> {
    let common = history.common_dir();
    let mut paths = vec![
        history.git_dir().join("HEAD"),
        common.join("packed-refs"),
        common.join("refs").join("tags"),
    ];
    if let Some(branch) = history.head_ref() {
        paths.push(common.join(branch));
    }
    paths.retain(|p| p.exists());
    paths
}
