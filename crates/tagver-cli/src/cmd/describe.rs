//! Describe command
//!
//! Prints the raw triple without encoding it, so a tag the encoder rejects
//! can still be inspected.

use crate::Context;
use anyhow::{Context as _, Result};

/// Print `<tag> <distance> <commit>`, with `-` for a missing tag
pub fn describe(ctx: &Context) -> Result<()> {
    let history = ctx.history()?;
    let result = tagver_core::describe(&history).context("Failed to describe HEAD")?;
    println!(
        "{} {} {}",
        result.tag.as_deref().unwrap_or("-"),
        result.distance,
        result.commit
    );
    Ok(())
}
