//! The describe triple and long-form descriptor parsing.
//!
//! A long-form descriptor looks like `v1.0-beta-3-g23701cf`. Tag names may
//! themselves contain hyphens, so parsing peels exactly two fields off the
//! right-hand end and keeps everything else as the tag.

use crate::commit::CommitId;
use serde::{Deserialize, Serialize};

/// A long-form descriptor that does not have the `<tag>-<n>-g<id>` shape.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unparseable describe output: '{descriptor}'")]
pub struct CorruptDescribe {
    /// The descriptor exactly as the repository produced it.
    pub descriptor: String,
}

/// Nearest reachable tag, distance from it, and the current commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeResult {
    /// Nearest reachable tag, `None` when no tag is reachable from HEAD.
    pub tag: Option<String>,

    /// Commits since `tag`, or the total reachable commit count when untagged.
    pub distance: u64,

    /// The HEAD commit.
    pub commit: CommitId,
}

impl DescribeResult {
    /// Result for HEAD sitting `distance` commits past `tag`.
    pub fn tagged(tag: impl Into<String>, distance: u64, commit: CommitId) -> Self {
        Self {
            tag: Some(tag.into()),
            distance,
            commit,
        }
    }

    /// Result for a history with no reachable tag; `count` includes HEAD.
    pub fn untagged(count: u64, commit: CommitId) -> Self {
        Self {
            tag: None,
            distance: count,
            commit,
        }
    }

    /// Parse a long-form descriptor, resolving the `g<id>` suffix with `resolve`.
    ///
    /// The last field must be `g` followed by an object name, the one before
    /// it an unsigned decimal count. Whatever precedes those two fields is the
    /// tag, verbatim.
    ///
    /// # Errors
    ///
    /// Returns a [`CorruptDescribe`] (converted into `E`) when the shape is
    /// wrong, or whatever `resolve` returns when the object name can't be resolved.
    pub fn parse_long<E, F>(descriptor: &str, resolve: F) -> Result<Self, E>
    where
        E: From<CorruptDescribe>,
        F: FnOnce(&str) -> Result<CommitId, E>,
    {
        let trimmed = descriptor.trim();
        let corrupt = || CorruptDescribe {
            descriptor: descriptor.to_string(),
        };

        let (rest, suffix) = trimmed.rsplit_once('-').ok_or_else(corrupt)?;
        let object = suffix
            .strip_prefix('g')
            .filter(|s| !s.is_empty())
            .ok_or_else(corrupt)?;

        let (tag, count) = rest.rsplit_once('-').ok_or_else(corrupt)?;
        if tag.is_empty() || count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
            return Err(corrupt().into());
        }
        let distance = count.parse::<u64>().map_err(|_| corrupt())?;

        let commit = resolve(object)?;
        Ok(Self::tagged(tag, distance, commit))
    }

    /// Whether HEAD is exactly the tagged commit.
    pub fn is_exact(&self) -> bool {
        self.tag.is_some() && self.distance == 0
    }
}
