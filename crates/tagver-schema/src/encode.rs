//! Version encoder - turns a describe triple into a version code and name.
//!
//! The code packs three 8-bit fields into 24 bits:
//!
//! ```text
//!  23        16 15         8 7          0
//! +------------+------------+------------+
//! |   major    |   minor    |  distance  |
//! +------------+------------+------------+
//! ```
//!
//! Committing on top of a tag bumps `distance`; a new `v<major>.<minor>` tag
//! resets it on a higher baseline. Both keep the code strictly increasing,
//! which is what "higher version code wins" upgrade policies need. Overflow is
//! an error, never a wrap.

use crate::UNTAGGED_NAME;
use crate::commit::CommitId;
use crate::describe::DescribeResult;
use serde::{Deserialize, Serialize};

/// Largest value any packed field may hold.
pub const MAX_FIELD: u64 = 0xff;

/// Prefix every version tag must carry.
pub const TAG_PREFIX: char = 'v';

/// One of the three packed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Bits 16..24.
    Major,
    /// Bits 8..16.
    Minor,
    /// Bits 0..8.
    Distance,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Field::Major => "major",
            Field::Minor => "minor",
            Field::Distance => "distance",
        })
    }
}

/// Why a tag failed the `v<major>.<minor>` shape check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagProblem {
    /// The tag does not start with `v`.
    MissingPrefix,
    /// Splitting on `.` did not give exactly two components.
    ComponentCount(usize),
    /// A component is not a plain run of decimal digits.
    NonNumeric {
        /// Which component failed.
        field: Field,
        /// The offending text.
        value: String,
    },
}

impl std::fmt::Display for TagProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagProblem::MissingPrefix => write!(f, "does not begin with '{TAG_PREFIX}'"),
            TagProblem::ComponentCount(n) => write!(
                f,
                "is not in the form '{TAG_PREFIX}<major>.<minor>' ({n} components)"
            ),
            TagProblem::NonNumeric { field, value } => {
                write!(f, "has a non-numeric {field} component '{value}'")
            }
        }
    }
}

/// Errors from the version encoder.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The nearest tag does not look like `v<major>.<minor>`.
    #[error("Malformed tag '{tag}': {problem}")]
    MalformedTag {
        /// The tag as found in the repository.
        tag: String,
        /// Which check failed.
        problem: TagProblem,
    },

    /// A field does not fit in 8 bits.
    #[error("{field} value {value} exceeds {max}", max = MAX_FIELD)]
    FieldOverflow {
        /// The overflowing field.
        field: Field,
        /// The value that did not fit (saturated at `u64::MAX`).
        value: u64,
    },
}

/// A 24-bit packed version code: `(major << 16) | (minor << 8) | distance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionCode(u32);

impl VersionCode {
    /// Pack three 8-bit fields.
    pub fn pack(major: u8, minor: u8, distance: u8) -> Self {
        Self((u32::from(major) << 16) | (u32::from(minor) << 8) | u32::from(distance))
    }

    /// The packed integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Bits 16..24.
    pub fn major(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Bits 8..16.
    pub fn minor(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// Bits 0..8.
    pub fn distance(self) -> u8 {
        self.0.to_be_bytes()[3]
    }
}

impl std::fmt::Display for VersionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<VersionCode> for u32 {
    fn from(code: VersionCode) -> Self {
        code.0
    }
}

/// Human-readable version, e.g. `1.0.r3.g23701cf` or `NONE.r1.g23701cf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionName(String);

impl VersionName {
    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for VersionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The output pair, produced together or not at all, plus its source triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Monotonic build number.
    pub code: VersionCode,
    /// Display string.
    pub name: VersionName,
    /// Describe result both were derived from.
    pub describe: DescribeResult,
}

fn component(tag: &str, field: Field, value: &str) -> Result<u64, EncodeError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodeError::MalformedTag {
            tag: tag.to_string(),
            problem: TagProblem::NonNumeric {
                field,
                value: value.to_string(),
            },
        });
    }

    // All digits, so the only possible failure is a value beyond u64.
    value.parse::<u64>().map_err(|_| EncodeError::FieldOverflow {
        field,
        value: u64::MAX,
    })
}

fn parse_tag(tag: &str) -> Result<(u64, u64), EncodeError> {
    let malformed = |problem| EncodeError::MalformedTag {
        tag: tag.to_string(),
        problem,
    };

    let rest = tag
        .strip_prefix(TAG_PREFIX)
        .ok_or_else(|| malformed(TagProblem::MissingPrefix))?;

    let pieces: Vec<&str> = rest.split('.').collect();
    let [major, minor] = pieces.as_slice() else {
        return Err(malformed(TagProblem::ComponentCount(pieces.len())));
    };

    Ok((
        component(tag, Field::Major, major)?,
        component(tag, Field::Minor, minor)?,
    ))
}

fn narrow(field: Field, value: u64) -> Result<u8, EncodeError> {
    u8::try_from(value).map_err(|_| EncodeError::FieldOverflow { field, value })
}

/// Compute the packed version code.
///
/// An absent tag means `major = minor = 0`.
///
/// # Errors
///
/// [`EncodeError::MalformedTag`] if the tag is not `v<major>.<minor>` with
/// numeric components, [`EncodeError::FieldOverflow`] if any field exceeds 255.
pub fn encode_code(result: &DescribeResult) -> Result<VersionCode, EncodeError> {
    let (major, minor) = match result.tag.as_deref() {
        Some(tag) => parse_tag(tag)?,
        None => (0, 0),
    };

    Ok(VersionCode::pack(
        narrow(Field::Major, major)?,
        narrow(Field::Minor, minor)?,
        narrow(Field::Distance, result.distance)?,
    ))
}

/// Build the display name.
///
/// `abbreviate` is only called when `distance > 0`; it should return the
/// shortest unambiguous prefix of the commit id within its repository.
///
/// # Errors
///
/// Only what `abbreviate` returns.
pub fn encode_name<E, F>(result: &DescribeResult, abbreviate: F) -> Result<VersionName, E>
where
    F: FnOnce(&CommitId) -> Result<String, E>,
{
    let tag = match result.tag.as_deref() {
        Some(tag) => tag.strip_prefix(TAG_PREFIX).unwrap_or(tag),
        None => UNTAGGED_NAME,
    };

    let mut name = String::from(tag);
    if result.distance > 0 {
        let short = abbreviate(&result.commit)?;
        name.push_str(&format!(".r{}.g{short}", result.distance));
    }

    Ok(VersionName(name))
}
