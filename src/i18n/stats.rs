//! Locale statistics: how many translatable objects carry each locale.
//!
//! Used to present the locales a bundle can be swapped to, together with how
//! complete each one is. The numbers are informational only; nothing in the
//! swap engine depends on them.

use crate::metadata::MetadataBundle;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Per-locale translation counts for one bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleStats {
    /// Locale code -> number of translatable objects with at least one record in it
    pub locales: BTreeMap<String, usize>,

    /// Objects carrying a `translations` array
    pub translatable_objects: usize,

    /// Objects without a `translations` array
    pub other_objects: usize,
}

impl LocaleStats {
    /// Number of translatable objects translated (fully or partially) into `locale`.
    pub fn count(&self, locale: &str) -> usize {
        self.locales.get(locale).copied().unwrap_or(0)
    }

    /// Share of translatable objects that have `locale`, in percent.
    ///
    /// # Returns
    /// `None` when the bundle has no translatable objects.
    pub fn completeness(&self, locale: &str) -> Option<f64> {
        if self.translatable_objects == 0 {
            return None;
        }
        Some(100.0 * self.count(locale) as f64 / self.translatable_objects as f64)
    }

    pub fn total_objects(&self) -> usize {
        self.translatable_objects + self.other_objects
    }

    /// One display line per locale, e.g. `fr: 12 objects translated (80.0%)`.
    pub fn choice_lines(&self) -> Vec<String> {
        self.locales
            .iter()
            .map(|(locale, count)| {
                let pct = self.completeness(locale).unwrap_or(0.0);
                format!("{}: {} objects translated ({:.1}%)", locale, count, pct)
            })
            .collect()
    }
}

/// Translation records of an object, if it is translatable.
fn translations(object: &Map<String, Value>) -> Option<&Vec<Value>> {
    object.get("translations").and_then(Value::as_array)
}

/// Scan every object in the bundle and count locales per translatable object.
pub fn collect_stats(bundle: &MetadataBundle) -> LocaleStats {
    let mut stats = LocaleStats::default();

    for object in bundle.objects() {
        let Some(records) = translations(object) else {
            stats.other_objects += 1;
            continue;
        };
        stats.translatable_objects += 1;

        let object_locales: BTreeSet<&str> = records
            .iter()
            .filter_map(|r| r.get("locale").and_then(Value::as_str))
            .collect();
        for locale in object_locales {
            *stats.locales.entry(locale.to_string()).or_insert(0) += 1;
        }
    }

    stats
}
