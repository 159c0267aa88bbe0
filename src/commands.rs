//! The two bundle operations end to end: load, transform in memory, save.
//!
//! Nothing is written unless the whole transformation succeeded, and the
//! input file is never overwritten.

use crate::config::Config;
use crate::defaults::{diff_defaults, resolve_file_defaults, substitute};
use crate::i18n::{collect_stats, swap_translations, LocaleStats, SwapSummary};
use crate::metadata::{defaults_output_path, load_bundle, locale_output_path, save_derived};
use crate::server::{resolve_server_defaults, ServerClient};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Repoint the bundle's default category identifiers to the server's.
///
/// # Returns
/// * `Ok(Some(path))` with the `_newDefaults` file written
/// * `Ok(None)` when file and server defaults already agree (nothing written)
pub async fn update_defaults(input: &Path, config: &Config) -> Result<Option<PathBuf>> {
    let bundle = load_bundle(input).context("Failed to read metadata file")?;

    let client = ServerClient::new(config);
    client
        .system_info()
        .await
        .with_context(|| format!("Could not connect to {}", client.base_url()))?;

    let server_defaults = resolve_server_defaults(&client)
        .await
        .context("Could not determine defaults on server")?;
    let file_defaults = resolve_file_defaults(&bundle);

    let replacements = diff_defaults(&file_defaults, &server_defaults);
    let (bundle, changed) = substitute(bundle, &replacements)
        .context("Failed to replace default identifiers")?;
    if !changed {
        info!("Defaults in file and on server already aligned.");
        return Ok(None);
    }

    let output = defaults_output_path(input);
    save_derived(&bundle, input, &output).context("Failed to save metadata file")?;
    Ok(Some(output))
}

/// Count translations per locale in the file at `input`.
pub fn locale_report(input: &Path) -> Result<LocaleStats> {
    let bundle = load_bundle(input).context("Failed to read metadata file")?;
    Ok(collect_stats(&bundle))
}

/// Make `new_locale` the primary locale of the file at `input`.
///
/// `current_locale` is the locale currently held in the primary fields; it
/// becomes the label of the demoted translation records.
pub fn swap_locale(input: &Path, current_locale: &str, new_locale: &str) -> Result<(PathBuf, SwapSummary)> {
    if current_locale == new_locale {
        bail!("Current and new locale are both '{}'", new_locale);
    }

    let mut bundle = load_bundle(input).context("Failed to read metadata file")?;
    let stats = collect_stats(&bundle);
    if stats.count(new_locale) == 0 {
        bail!("No objects in {} have {} translations", input.display(), new_locale);
    }

    let summary = swap_translations(&mut bundle, current_locale, new_locale);

    let output = locale_output_path(input, new_locale);
    save_derived(&bundle, input, &output).context("Error saving swapped metadata file")?;
    Ok((output, summary))
}
