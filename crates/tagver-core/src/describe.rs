//! Describer: nearest tag, distance and HEAD, then the derived version.

use crate::config::Config;
use crate::error::VersionError;
use crate::history::{GitHistory, History};
use std::path::Path;
use tagver_schema::{DescribeResult, Version, encode_code, encode_name};
use tracing::{debug, info};

/// Describe HEAD relative to its nearest reachable tag.
///
/// Without a reachable tag the distance is the number of commits reachable
/// from HEAD, HEAD included. Callers rely on the resulting code ordering, so
/// this is the count from an implicit root, not a tag distance.
///
/// # Errors
///
/// [`VersionError::RepositoryUnavailable`] on read failures,
/// [`VersionError::CorruptDescribeState`] when describe output can't be
/// parsed or its commit can't be resolved.
pub fn describe<H: History>(history: &H) -> Result<DescribeResult, VersionError> {
    if let Some(descriptor) = history.describe_long()? {
        let result = DescribeResult::parse_long(&descriptor, |object| {
            history
                .resolve(object)
                .map_err(|err| VersionError::corrupt(&descriptor, err))
        })?;
        debug!(
            %descriptor,
            tag = result.tag.as_deref(),
            distance = result.distance,
            "described HEAD"
        );
        return Ok(result);
    }

    let head = history.head()?;
    let count = history
        .ancestry()?
        .try_fold(0u64, |count, commit| commit.map(|_| count + 1))?;
    if count == 0 {
        return Err(VersionError::unavailable(
            "walk history",
            "no commits reachable from HEAD",
        ));
    }

    debug!(count, %head, "no reachable tag, counted history");
    Ok(DescribeResult::untagged(count, head))
}

/// Describe, then encode both outputs.
///
/// Either both the code and the name are produced or the call fails.
///
/// # Errors
///
/// Anything [`describe`] returns, plus [`VersionError::Encode`] for tags that
/// don't fit the `v<major>.<minor>` scheme or fields beyond 255.
pub fn derive<H: History>(history: &H) -> Result<Version, VersionError> {
    let describe = describe(history)?;
    let code = encode_code(&describe)?;
    let name = encode_name(&describe, |commit| history.abbreviate(commit))?;

    info!(%code, %name, "derived version");
    Ok(Version {
        code,
        name,
        describe,
    })
}

/// Derive the version of the repository containing `path`.
///
/// The repository is opened for the duration of the call only.
///
/// # Errors
///
/// See [`derive`].
pub fn derive_at(path: &Path, config: &Config) -> Result<Version, VersionError> {
    let history = GitHistory::discover(path)?.with_tags(config.describe.tags);
    derive(&history)
}
