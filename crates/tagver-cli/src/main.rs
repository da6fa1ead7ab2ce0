//! tagver - version code and name from git tags

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tagver_cli::cmd;
use tagver_cli::{Cli, Commands, Context};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Completions { shell } = cli.command {
        cmd::completions::completions(shell);
        return Ok(());
    }

    let ctx = Context::load(&cli)?;
    match cli.command {
        Commands::Show { format, prefix } => cmd::show::show(&ctx, format, prefix.as_deref()),
        Commands::Code => cmd::code::code(&ctx),
        Commands::Name => cmd::name::name(&ctx),
        Commands::Describe => cmd::describe::describe(&ctx),
        Commands::Completions { .. } => Ok(()),
    }
}
