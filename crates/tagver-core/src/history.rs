//! Read-only access to a repository's history.
//!
//! [`History`] is the seam between the describe logic and git itself, so the
//! logic can be exercised against an in-memory history in tests.

use crate::error::VersionError;
use git2::{DescribeFormatOptions, DescribeOptions, ErrorClass, ErrorCode, Oid, Repository};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tagver_schema::CommitId;
use tracing::debug;

/// Which tags may serve as the describe anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSelection {
    /// Annotated and lightweight tags.
    #[default]
    All,
    /// Annotated tags only.
    Annotated,
}

/// The repository operations describing needs.
pub trait History {
    /// Long-form describe of HEAD, `<tag>-<count>-g<object>`.
    ///
    /// `Ok(None)` when no tag is reachable from HEAD.
    fn describe_long(&self) -> Result<Option<String>, VersionError>;

    /// Resolve a full or abbreviated hex object id to a commit id.
    ///
    /// Only object ids are accepted; ref names never match.
    fn resolve(&self, object: &str) -> Result<CommitId, VersionError>;

    /// The commit HEAD points at.
    fn head(&self) -> Result<CommitId, VersionError>;

    /// Every commit reachable from HEAD, HEAD included, each exactly once.
    fn ancestry(
        &self,
    ) -> Result<impl Iterator<Item = Result<CommitId, VersionError>>, VersionError>;

    /// Shortest unambiguous hex prefix of `commit`.
    fn abbreviate(&self, commit: &CommitId) -> Result<String, VersionError>;
}

/// [`History`] backed by a libgit2 repository handle.
///
/// The handle is released when this value is dropped.
pub struct GitHistory {
    repo: Repository,
    tags: TagSelection,
}

impl std::fmt::Debug for GitHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHistory")
            .field("git_dir", &self.repo.path())
            .field("tags", &self.tags)
            .finish()
    }
}

fn commit_id(oid: Oid) -> Result<CommitId, VersionError> {
    CommitId::from_bytes(oid.as_bytes()).map_err(|e| VersionError::unavailable("read object id", e))
}

impl GitHistory {
    /// Open the repository rooted exactly at `path`.
    ///
    /// # Errors
    ///
    /// [`VersionError::RepositoryUnavailable`] if there is no repository at
    /// `path` or HEAD does not point at a commit.
    pub fn open(path: &Path) -> Result<Self, VersionError> {
        let repo = Repository::open(path)
            .map_err(|e| VersionError::unavailable("open repository", e.message()))?;
        Self::from_repository(repo)
    }

    /// Open the repository containing `path`, searching parent directories.
    ///
    /// # Errors
    ///
    /// Same as [`GitHistory::open`].
    pub fn discover(path: &Path) -> Result<Self, VersionError> {
        let repo = Repository::discover(path)
            .map_err(|e| VersionError::unavailable("discover repository", e.message()))?;
        Self::from_repository(repo)
    }

    /// Wrap an already opened repository.
    ///
    /// # Errors
    ///
    /// [`VersionError::RepositoryUnavailable`] if HEAD is unborn.
    pub fn from_repository(repo: Repository) -> Result<Self, VersionError> {
        let history = Self {
            repo,
            tags: TagSelection::default(),
        };
        history.head()?;
        debug!(git_dir = %history.repo.path().display(), "opened repository");
        Ok(history)
    }

    /// Restrict or widen the tags describe may anchor on.
    pub fn with_tags(mut self, tags: TagSelection) -> Self {
        self.tags = tags;
        self
    }

    /// The `.git` directory (or the repository itself when bare).
    ///
    /// For a linked worktree this is its private directory under
    /// `worktrees/`, which holds its own HEAD.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// The directory holding refs and objects shared by every worktree.
    ///
    /// Same as [`GitHistory::git_dir`] outside linked worktrees.
    pub fn common_dir(&self) -> &Path {
        self.repo.commondir()
    }

    /// Full name of the ref HEAD points at, e.g. `refs/heads/main`.
    ///
    /// `None` when HEAD is detached.
    pub fn head_ref(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        if head.is_branch() {
            head.name().map(str::to_owned)
        } else {
            None
        }
    }

    fn tag_target(&self, name: &str) -> Option<Oid> {
        let reference = self.repo.find_reference(&format!("refs/tags/{name}")).ok()?;
        reference.peel_to_commit().ok().map(|commit| commit.id())
    }

    fn oid(commit: &CommitId) -> Result<Oid, VersionError> {
        Oid::from_bytes(commit.as_bytes())
            .map_err(|e| VersionError::unavailable("convert commit id", e.message()))
    }
}

impl History for GitHistory {
    fn describe_long(&self) -> Result<Option<String>, VersionError> {
        let head = self
            .repo
            .head()
            .and_then(|r| r.peel_to_commit())
            .map_err(|e| VersionError::unavailable("read HEAD", e.message()))?;

        let mut opts = DescribeOptions::new();
        if self.tags == TagSelection::All {
            opts.describe_tags();
        }

        let object = head.into_object();
        let describe = match object.describe(&opts) {
            Ok(describe) => describe,
            // libgit2 reports "nothing to anchor on" either as not-found or
            // as a generic describe-class error when no candidate refs exist.
            Err(e) if e.code() == ErrorCode::NotFound || e.class() == ErrorClass::Describe => {
                debug!(reason = e.message(), "no tag reachable from HEAD");
                return Ok(None);
            }
            Err(e) => return Err(VersionError::unavailable("describe HEAD", e.message())),
        };

        let mut format = DescribeFormatOptions::new();
        format.always_use_long_format(true);
        let descriptor = describe
            .format(Some(&format))
            .map_err(|e| VersionError::unavailable("format describe output", e.message()))?;

        // An exact match may come back as the bare tag name.
        if self.tag_target(&descriptor) == Some(object.id()) {
            let short = object
                .short_id()
                .map_err(|e| VersionError::unavailable("abbreviate commit", e.message()))?;
            let short = short.as_str().unwrap_or_default();
            return Ok(Some(format!("{descriptor}-0-g{short}")));
        }

        Ok(Some(descriptor))
    }

    fn resolve(&self, object: &str) -> Result<CommitId, VersionError> {
        if object.is_empty() || !object.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(VersionError::unavailable(
                "resolve object",
                format!("'{object}' is not a hex object id"),
            ));
        }
        let commit = self
            .repo
            .find_commit_by_prefix(object)
            .map_err(|e| VersionError::unavailable("resolve object", e.message()))?;
        commit_id(commit.id())
    }

    fn head(&self) -> Result<CommitId, VersionError> {
        let commit = self
            .repo
            .head()
            .and_then(|r| r.peel_to_commit())
            .map_err(|e| VersionError::unavailable("read HEAD", e.message()))?;
        commit_id(commit.id())
    }

    fn ancestry(
        &self,
    ) -> Result<impl Iterator<Item = Result<CommitId, VersionError>>, VersionError> {
        let mut walk = self
            .repo
            .revwalk()
            .map_err(|e| VersionError::unavailable("start history walk", e.message()))?;
        walk.push_head()
            .map_err(|e| VersionError::unavailable("start history walk", e.message()))?;

        Ok(walk.map(|oid| {
            oid.map_err(|e| VersionError::unavailable("walk history", e.message()))
                .and_then(commit_id)
        }))
    }

    fn abbreviate(&self, commit: &CommitId) -> Result<String, VersionError> {
        let object = self
            .repo
            .find_object(Self::oid(commit)?, None)
            .map_err(|e| VersionError::unavailable("find commit", e.message()))?;
        let short = object
            .short_id()
            .map_err(|e| VersionError::unavailable("abbreviate commit", e.message()))?;
        short
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| VersionError::unavailable("abbreviate commit", "id is not UTF-8"))
    }
}
