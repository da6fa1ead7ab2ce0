//! Build script to derive this binary's own version from git tags
//!
//! Falls back to the Cargo.toml version when built outside a checkout or
//! from a checkout whose tags don't fit the scheme.

use std::path::Path;
use tagver_core::output::{cargo_instructions, fallback_instructions, rerun_paths};

const PREFIX: &str = "TAGVER_BUILD";

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let fallback_name = env!("CARGO_PKG_VERSION");

    let lines = match tagver_core::GitHistory::discover(Path::new(&manifest_dir)) {
        Ok(history) => {
            let rerun = rerun_paths(&history);
            match tagver_core::derive(&history) {
                Ok(version) => cargo_instructions(&version, PREFIX, &rerun),
                Err(err) => fallback_instructions(PREFIX, fallback_name, &err.to_string(), &rerun),
            }
        }
        // Not a checkout (e.g. a packaged crate): nothing to watch
        Err(err) => fallback_instructions(PREFIX, fallback_name, &err.to_string(), &[]),
    };

    for line in lines {
        println!("{line}");
    }
}
