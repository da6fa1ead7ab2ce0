//! Commit identifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Byte width of a SHA-1 object id.
pub const SHA1_LEN: usize = 20;

/// Byte width of a SHA-256 object id.
pub const SHA256_LEN: usize = 32;

/// Errors produced while building a [`CommitId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitIdError {
    /// The raw id is neither 20 nor 32 bytes wide.
    #[error("Invalid commit id width: expected 20 or 32 bytes, got {0}")]
    InvalidWidth(usize),

    /// The hex form contains something other than hex digits.
    #[error("Invalid commit id: non-hex characters in '{0}'")]
    InvalidHex(String),
}

/// A fixed-width binary commit hash (SHA-1 or SHA-256).
///
/// Serialized as lowercase hex so JSON output stays readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(Vec<u8>);

impl CommitId {
    /// Build a commit id from raw hash bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CommitIdError::InvalidWidth`] unless `bytes` is 20 or 32 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CommitIdError> {
        match bytes.len() {
            SHA1_LEN | SHA256_LEN => Ok(Self(bytes.to_vec())),
            n => Err(CommitIdError::InvalidWidth(n)),
        }
    }

    /// Parse a full 40 or 64 digit hex id.
    ///
    /// # Errors
    ///
    /// Returns [`CommitIdError::InvalidHex`] for non-hex input and
    /// [`CommitIdError::InvalidWidth`] when the decoded width is wrong.
    pub fn from_hex(s: &str) -> Result<Self, CommitIdError> {
        let bytes = hex::decode(s).map_err(|_| CommitIdError::InvalidHex(s.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Raw hash bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Full lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for CommitId {
    type Err = CommitIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for CommitId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CommitId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
