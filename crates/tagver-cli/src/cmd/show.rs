//! Show command

use crate::Context;
use crate::ui::Theme;
use anyhow::Result;
use tagver_core::OutputFormat;
use tagver_core::output::{cargo_instructions, env_lines, json, rerun_paths};

/// Print the version code and name in the requested format
///
/// Everything is rendered before anything is printed, so a failure never
/// leaves half an answer on stdout.
pub fn show(ctx: &Context, format: Option<OutputFormat>, prefix: Option<&str>) -> Result<()> {
    let format = format.unwrap_or(ctx.config.output.format);
    let prefix = prefix.unwrap_or(&ctx.config.output.prefix);
    let (history, version) = ctx.derive()?;

    let lines = match format {
        OutputFormat::Text => {
            let describe = &version.describe;
            Theme::default().fields(&[
                ("Name", version.name.to_string()),
                ("Code", version.code.to_string()),
                ("Tag", describe.tag.clone().unwrap_or_else(|| "-".to_string())),
                ("Distance", describe.distance.to_string()),
                ("Commit", describe.commit.to_string()),
            ])
        }
        OutputFormat::Json => vec![json(&version)?],
        OutputFormat::Env => env_lines(&version, prefix),
        OutputFormat::Cargo => cargo_instructions(&version, prefix, &rerun_paths(&history)),
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}
