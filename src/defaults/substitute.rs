//! Identifier substitution across the whole bundle.
//!
//! Default identifiers turn up in places that cannot practically be listed
//! structurally: custom form HTML, indicator formulas, program rule
//! conditions. The bundle is therefore rewritten as text: serialize, replace
//! every literal occurrence of the old identifier, parse again. Identifiers
//! are high-entropy tokens, so unrelated text matching one is not expected.

use crate::defaults::resolver::Replacement;
use crate::error::{MetadataError, Result};
use crate::metadata::MetadataBundle;
use regex::{NoExpand, Regex};
use tracing::{debug, info, warn};

/// Apply `replacements` in order, each on a freshly parsed document.
///
/// # Returns
/// The rewritten bundle and whether any replacement was applied. An empty
/// list returns the bundle unchanged with `false`.
///
/// # Errors
/// `ReparseFailure` if a rewrite produced text that no longer parses. The
/// input bundle is consumed, so no partial result can escape.
pub fn substitute(
    bundle: MetadataBundle,
    replacements: &[Replacement],
) -> Result<(MetadataBundle, bool)> {
    if replacements.is_empty() {
        return Ok((bundle, false));
    }

    let mut bundle = bundle;
    for replacement in replacements {
        bundle = replace_identifier(&bundle, replacement)?;
    }
    Ok((bundle, true))
}

fn replace_identifier(bundle: &MetadataBundle, replacement: &Replacement) -> Result<MetadataBundle> {
    let Replacement { kind, old, new } = replacement;
    if old.is_empty() {
        warn!("Empty default {} identifier in file, nothing to replace", kind);
        return Ok(bundle.clone());
    }

    let text = bundle.to_canonical_string()?;
    let pattern = Regex::new(&regex::escape(&json_escaped(old)?))?;
    let replacement = json_escaped(new)?;
    let occurrences = pattern.find_iter(&text).count();
    let rewritten = pattern.replace_all(&text, NoExpand(&replacement));

    let value = serde_json::from_str(&rewritten).map_err(|source| MetadataError::ReparseFailure {
        old: old.clone(),
        new: new.clone(),
        source,
    })?;
    info!("Replaced {} occurrences of default {} {} with {}", occurrences, kind, old, new);
    debug!("Bundle text is {} bytes after replacement", rewritten.len());

    MetadataBundle::from_value(value)
}

/// `s` as it appears inside a serialized JSON string, without the quotes.
fn json_escaped(s: &str) -> Result<String> {
    let quoted = serde_json::to_string(s).map_err(MetadataError::Serialization)?;
    Ok(quoted[1..quoted.len() - 1].to_string())
}
