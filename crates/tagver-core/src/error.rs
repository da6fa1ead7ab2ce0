//! Error taxonomy for describing a repository and deriving its version.

use tagver_schema::{CorruptDescribe, EncodeError};
use thiserror::Error;

/// Every way deriving a version can fail. All of them are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The repository could not be opened or read.
    #[error("Repository unavailable: {context}: {message}")]
    RepositoryUnavailable {
        /// What was being attempted.
        context: &'static str,
        /// Underlying failure.
        message: String,
    },

    /// Describe claimed a tag but its output could not be turned into a triple.
    #[error("Corrupt describe state for '{descriptor}': {detail}")]
    CorruptDescribeState {
        /// Raw long-form descriptor.
        descriptor: String,
        /// What went wrong with it.
        detail: String,
    },

    /// The tag or distance could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl VersionError {
    /// A repository read failure with context.
    pub fn unavailable(context: &'static str, message: impl std::fmt::Display) -> Self {
        Self::RepositoryUnavailable {
            context,
            message: message.to_string(),
        }
    }

    /// A describe result that contradicts the repository.
    pub fn corrupt(descriptor: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::CorruptDescribeState {
            descriptor: descriptor.into(),
            detail: detail.to_string(),
        }
    }
}

impl From<CorruptDescribe> for VersionError {
    fn from(err: CorruptDescribe) -> Self {
        Self::corrupt(err.descriptor, "expected '<tag>-<count>-g<object>'")
    }
}
