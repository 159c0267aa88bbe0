//! Default identifier resolution.
//!
//! Each of the four category dimension types has exactly one object named
//! `"default"`. An export taken from one server carries that server's default
//! identifiers; importing it elsewhere needs them repointed to the target's.

use crate::metadata::MetadataBundle;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{info, warn};

/// Name shared by the designated default object of each category type.
pub const DEFAULT_OBJECT_NAME: &str = "default";

/// The category dimension types that have a designated default object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DefaultKind {
    CategoryOptions,
    Categories,
    CategoryOptionCombos,
    CategoryCombos,
}

impl DefaultKind {
    /// Order in which replacements are applied.
    pub const SUBSTITUTION_ORDER: [DefaultKind; 4] = [
        DefaultKind::CategoryOptions,
        DefaultKind::Categories,
        DefaultKind::CategoryOptionCombos,
        DefaultKind::CategoryCombos,
    ];

    /// Bundle key and API resource name for this type.
    pub fn type_name(&self) -> &'static str {
        match self {
            DefaultKind::CategoryOptions => "categoryOptions",
            DefaultKind::Categories => "categories",
            DefaultKind::CategoryOptionCombos => "categoryOptionCombos",
            DefaultKind::CategoryCombos => "categoryCombos",
        }
    }
}

impl fmt::Display for DefaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Identifier of the default object for each category type, if known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultsMap {
    pub category_options: Option<String>,
    pub categories: Option<String>,
    pub category_option_combos: Option<String>,
    pub category_combos: Option<String>,
}

impl DefaultsMap {
    pub fn get(&self, kind: DefaultKind) -> Option<&str> {
        match kind {
            DefaultKind::CategoryOptions => self.category_options.as_deref(),
            DefaultKind::Categories => self.categories.as_deref(),
            DefaultKind::CategoryOptionCombos => self.category_option_combos.as_deref(),
            DefaultKind::CategoryCombos => self.category_combos.as_deref(),
        }
    }

    pub fn set(&mut self, kind: DefaultKind, id: Option<String>) {
        let slot = match kind {
            DefaultKind::CategoryOptions => &mut self.category_options,
            DefaultKind::Categories => &mut self.categories,
            DefaultKind::CategoryOptionCombos => &mut self.category_option_combos,
            DefaultKind::CategoryCombos => &mut self.category_combos,
        };
        *slot = id;
    }
}

impl fmt::Display for DefaultsMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = DefaultKind::SUBSTITUTION_ORDER
            .iter()
            .map(|kind| format!("{}: {}", kind, self.get(*kind).unwrap_or("null")))
            .collect();
        write!(f, "{{ {} }}", parts.join(", "))
    }
}

/// One identifier to repoint across the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub kind: DefaultKind,
    pub old: String,
    pub new: String,
}

impl Replacement {
    /// The replacement that undoes this one.
    pub fn inverted(&self) -> Self {
        Self {
            kind: self.kind,
            old: self.new.clone(),
            new: self.old.clone(),
        }
    }
}

/// Find the identifier of the first object named `"default"` for each type.
///
/// Types missing from the bundle, or without a default object, stay `None`.
pub fn resolve_file_defaults(bundle: &MetadataBundle) -> DefaultsMap {
    let mut defaults = DefaultsMap::default();

    for kind in DefaultKind::SUBSTITUTION_ORDER {
        let id = bundle
            .objects_of(kind.type_name())
            .find(|o| o.get("name").and_then(Value::as_str) == Some(DEFAULT_OBJECT_NAME))
            .and_then(|o| o.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string);
        defaults.set(kind, id);
    }

    info!("Defaults found in file: {}", defaults);
    defaults
}

/// Replacements needed to align the file's defaults with the server's, in
/// substitution order.
///
/// A type missing on either side cannot be repointed and is skipped.
pub fn diff_defaults(file: &DefaultsMap, server: &DefaultsMap) -> Vec<Replacement> {
    let mut replacements = Vec::new();

    for kind in DefaultKind::SUBSTITUTION_ORDER {
        match (file.get(kind), server.get(kind)) {
            (Some(old), Some(new)) if old != new => {
                info!("Changing default {} from {} to {}", kind, old, new);
                replacements.push(Replacement {
                    kind,
                    old: old.to_string(),
                    new: new.to_string(),
                });
            }
            (None, Some(new)) => {
                warn!("No default {} in file, cannot repoint to {}", kind, new);
            }
            (Some(old), None) => {
                warn!("No default {} known on server, keeping {}", kind, old);
            }
            _ => {}
        }
    }

    replacements
}
