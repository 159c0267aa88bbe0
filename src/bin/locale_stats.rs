//! Locale statistics for a metadata file, as JSON on stdout.
//!
//! Usage:
//!   locale-stats <metadata.json>

use anyhow::{Context, Result};
use metadata_swap::commands;
use std::path::Path;
use tracing::info;

/// This binary's own logs plus the library's.
const LOG_DIRECTIVES: [&str; 2] = ["locale_stats=info", "metadata_swap=info"];

fn main() -> Result<()> {
    // Initialize logging
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("No metadata file specified. Use: locale-stats metadata.json")?;

    let stats = commands::locale_report(Path::new(&path))?;
    info!(
        "{} translatable objects, {} other objects",
        stats.translatable_objects, stats.other_objects
    );
    for line in stats.choice_lines() {
        info!("{}", line);
    }

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
