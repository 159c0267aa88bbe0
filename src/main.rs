//! Rewrite an exported metadata bundle.
//!
//! Usage:
//!   metadata-swap <metadata.json> defaults
//!   metadata-swap <metadata.json> translations <current-locale> <new-locale>
//!   metadata-swap <metadata.json> locales
//!
//! `defaults` reads DHIS2_URL, DHIS2_USERNAME and DHIS2_PASSWORD (a `.env`
//! file is honoured).

use anyhow::Result;
use metadata_swap::{commands, config::Config, i18n};
use std::path::{Path, PathBuf};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  metadata-swap <metadata.json> defaults");
    eprintln!("      Update default category dimensions based on server");
    eprintln!("  metadata-swap <metadata.json> translations <current-locale> <new-locale>");
    eprintln!("      Swap translations, making <new-locale> the main locale");
    eprintln!("  metadata-swap <metadata.json> locales");
    eprintln!("      List locales available in the file and the known locale catalog");
}

/// Help was asked for anywhere after the program name.
fn wants_help(args: &[String]) -> bool {
    args.iter()
        .skip(1)
        .any(|a| matches!(a.as_str(), "--help" | "-h" | "help"))
}

fn print_locales(input: &Path) -> Result<()> {
    let stats = commands::locale_report(input)?;

    println!("Current main locale (catalog):");
    for entry in i18n::all_locales() {
        let marker = if entry.code == i18n::DEFAULT_PRIMARY_LOCALE { " (default)" } else { "" };
        println!("  {}{}", entry.choice_line(), marker);
    }
    println!("Locales available in file:");
    for line in stats.choice_lines() {
        println!("  {}", line);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("metadata_swap=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if wants_help(&args) {
        print_usage();
        return Ok(());
    }
    if args.len() < 3 {
        eprintln!("No metadata file specified.");
        print_usage();
        std::process::exit(1);
    }

    let input = PathBuf::from(&args[1]);
    if !input.exists() {
        eprintln!("The specified file does not exist.");
        std::process::exit(1);
    }

    match args[2].as_str() {
        "defaults" => {
            let config = Config::from_env()?;
            match commands::update_defaults(&input, &config).await? {
                Some(output) => {
                    println!("Re-run with {} if updating translations.", output.display());
                }
                None => println!("Defaults in file and on server already aligned."),
            }
            Ok(())
        }
        "translations" => {
            let (Some(current), Some(new)) = (args.get(3), args.get(4)) else {
                print_locales(&input)?;
                print_usage();
                std::process::exit(1);
            };
            let current = i18n::catalog::code_from_choice(current);
            let new = i18n::catalog::code_from_choice(new);
            if i18n::find_locale(current).is_none() {
                eprintln!("Warning: {} is not a known platform locale", current);
            }

            let (output, summary) = commands::swap_locale(&input, current, new)?;
            println!(
                "Saved {} ({} values swapped, {} short names truncated)",
                output.display(),
                summary.swapped,
                summary.truncated
            );
            Ok(())
        }
        "locales" => print_locales(&input),
        other => {
            eprintln!("Not implemented: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }
}
