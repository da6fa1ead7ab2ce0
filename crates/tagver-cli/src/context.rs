//! Per-invocation context: which repository, which configuration.

use crate::Cli;
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tagver_core::{Config, GitHistory, Version, derive};

/// Resolved inputs shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Path inside the repository to describe.
    pub repo: PathBuf,
    /// Effective configuration.
    pub config: Config,
}

impl Context {
    /// Resolve the repository path and load configuration.
    ///
    /// An explicit `--config` must exist; otherwise the nearest `tagver.toml`
    /// above the repository path is used, if any.
    pub fn load(cli: &Cli) -> Result<Self> {
        let repo = std::fs::canonicalize(&cli.repo)
            .with_context(|| format!("Repository path not found: {}", cli.repo.display()))?;

        let config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => Config::discover(&repo)?,
        };

        Ok(Self { repo, config })
    }

    /// Open the repository. The handle closes when the returned value drops.
    pub fn history(&self) -> Result<GitHistory> {
        let history = GitHistory::discover(&self.repo)
            .context("Failed to open repository")?
            .with_tags(self.config.describe.tags);
        Ok(history)
    }

    /// Open the repository and derive its version.
    pub fn derive(&self) -> Result<(GitHistory, Version)> {
        let history = self.history()?;
        let version = derive(&history).context("Failed to derive version")?;
        Ok((history, version))
    }
}
