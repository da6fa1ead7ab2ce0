//! Shared types and the version encoder for tagver.
//!
//! Nothing in this crate touches a repository. A [`DescribeResult`] goes in,
//! a [`VersionCode`] and [`VersionName`] come out.

pub mod commit;
pub mod describe;
pub mod encode;

// Re-exports
pub use commit::{CommitId, CommitIdError};
pub use describe::{CorruptDescribe, DescribeResult};
pub use encode::{
    EncodeError, Field, MAX_FIELD, TAG_PREFIX, TagProblem, Version, VersionCode, VersionName,
    encode_code, encode_name,
};

/// Tag portion of a version name when no tag is reachable.
pub const UNTAGGED_NAME: &str = "NONE";
