//! Translation swap: promote one locale's translations into the primary fields.
//!
//! For every translation record in `new_locale` whose property maps to a field
//! the object actually has, the field value and the record value trade places
//! and the record is relabelled with `current_locale`. Running the swap again
//! with the locales reversed restores the bundle, except for `shortName`
//! values that had to be clipped to the platform limit.

use crate::error::MetadataError;
use crate::i18n::property::TranslatableProperty;
use crate::metadata::MetadataBundle;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// What a swap pass did, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SwapSummary {
    /// Records whose value traded places with the primary field
    pub swapped: usize,

    /// Promoted values clipped to the field length limit (lossy)
    pub truncated: usize,

    /// Records in the target locale with a property token we do not know
    pub unknown_properties: usize,

    /// Records in the target locale for a field the object does not have
    pub missing_fields: usize,

    /// Records in the target locale without a `value`
    pub missing_values: usize,
}

/// Swap `new_locale` translations into the primary fields of every object.
///
/// Objects without a `translations` array and records in other locales are
/// left alone. No record is added or dropped.
pub fn swap_translations(
    bundle: &mut MetadataBundle,
    current_locale: &str,
    new_locale: &str,
) -> SwapSummary {
    let mut summary = SwapSummary::default();

    for object in bundle.objects_mut() {
        let mut records = match object.get_mut("translations") {
            Some(Value::Array(records)) => std::mem::take(records),
            _ => continue,
        };

        for record in records.iter_mut() {
            if let Some(record) = record.as_object_mut() {
                swap_record(object, record, current_locale, new_locale, &mut summary);
            }
        }

        // Re-inserting an existing key keeps its position.
        object.insert("translations".to_string(), Value::Array(records));
    }

    info!(
        "Swapped {} translations from {} to {} ({} truncated, {} unknown properties, {} missing fields, {} missing values)",
        summary.swapped,
        new_locale,
        current_locale,
        summary.truncated,
        summary.unknown_properties,
        summary.missing_fields,
        summary.missing_values
    );
    summary
}

fn swap_record(
    object: &mut Map<String, Value>,
    record: &mut Map<String, Value>,
    current_locale: &str,
    new_locale: &str,
    summary: &mut SwapSummary,
) {
    if record.get("locale").and_then(Value::as_str) != Some(new_locale) {
        return;
    }
    let parsed = match record.get("property") {
        Some(Value::String(token)) => TranslatableProperty::from_token(token),
        Some(other) => Err(MetadataError::UnknownTranslatableProperty(other.to_string())),
        None => Err(MetadataError::UnknownTranslatableProperty("<missing>".to_string())),
    };
    let property = match parsed {
        Ok(property) => property,
        Err(e) => {
            warn!("{} (object {})", e, object_id(object));
            summary.unknown_properties += 1;
            return;
        }
    };

    let field = property.field_name();
    let Some(current_value) = object.get(field).cloned() else {
        debug!("Object {} has no {}, keeping {} translation", object_id(object), field, new_locale);
        summary.missing_fields += 1;
        return;
    };
    let Some(mut new_value) = record.get("value").cloned() else {
        warn!("{} translation of {} has no value (object {})", new_locale, property, object_id(object));
        summary.missing_values += 1;
        return;
    };

    if let Some(clipped) = property.max_chars().and_then(|limit| clip(&new_value, limit)) {
        new_value = clipped;
        summary.truncated += 1;
    }

    object.insert(field.to_string(), new_value);
    record.insert("value".to_string(), current_value);
    record.insert("locale".to_string(), Value::String(current_locale.to_string()));
    summary.swapped += 1;
}

/// `value` cut to `limit` characters, if it is a longer string.
fn clip(value: &Value, limit: usize) -> Option<Value> {
    match value {
        Value::String(text) if text.chars().count() > limit => {
            Some(Value::String(text.chars().take(limit).collect()))
        }
        _ => None,
    }
}

fn object_id(object: &Map<String, Value>) -> &str {
    object.get("id").and_then(Value::as_str).unwrap_or("<no id>")
}
