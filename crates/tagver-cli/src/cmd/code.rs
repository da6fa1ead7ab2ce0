//! Code command

use crate::Context;
use anyhow::Result;

/// Print the packed version code
pub fn code(ctx: &Context) -> Result<()> {
    let (_, version) = ctx.derive()?;
    println!("{}", version.code);
    Ok(())
}
