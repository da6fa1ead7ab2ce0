//! Name command

use crate::Context;
use anyhow::Result;

/// Print the version name
pub fn name(ctx: &Context) -> Result<()> {
    let (_, version) = ctx.derive()?;
    println!("{}", version.name);
    Ok(())
}
