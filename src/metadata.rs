//! Metadata bundle: the exported JSON document under transformation.
//!
//! A bundle maps object-type names (`"categories"`, `"dataElements"`, ...) to
//! arrays of objects. Top-level entries that are not arrays (export headers
//! such as `"system"` or `"date"`) are carried through untouched and never
//! visited by the engines.

use crate::error::{MetadataError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Suffix inserted before `.json` for bundles with repointed defaults.
pub const DEFAULTS_SUFFIX: &str = "_newDefaults";

/// A loaded metadata bundle, held in memory for the duration of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataBundle {
    root: Map<String, Value>,
}

impl MetadataBundle {
    /// Wrap a parsed JSON document, rejecting anything but a top-level object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(MetadataError::NotABundle(format!(
                "top level is {}, expected an object",
                json_kind(&other)
            ))),
        }
    }

    /// Parse a bundle from its JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Names of the object types present in the bundle, in file order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.root
            .iter()
            .filter(|(_, v)| v.is_array())
            .map(|(k, _)| k.as_str())
    }

    /// Objects of one type. Yields nothing when the type is absent.
    pub fn objects_of<'a>(&'a self, type_name: &str) -> impl Iterator<Item = &'a Map<String, Value>> {
        self.root
            .get(type_name)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
    }

    /// Every object of every type.
    pub fn objects(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.root
            .values()
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(Value::as_object)
    }

    /// Every object of every type, mutably.
    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut Map<String, Value>> {
        self.root
            .values_mut()
            .filter_map(Value::as_array_mut)
            .flatten()
            .filter_map(Value::as_object_mut)
    }

    pub fn object_count(&self) -> usize {
        self.objects().count()
    }

    /// Compact canonical text form, used by the substitution engine.
    pub fn to_canonical_string(&self) -> Result<String> {
        serde_json::to_string(&self.root).map_err(MetadataError::Serialization)
    }

    /// Pretty-printed form with 4-space indentation.
    pub fn to_pretty_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.root
            .serialize(&mut serializer)
            .map_err(MetadataError::Serialization)?;
        Ok(buf)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read and parse a bundle from disk.
pub fn load_bundle(path: &Path) -> Result<MetadataBundle> {
    if !path.exists() {
        return Err(MetadataError::FileNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bundle = MetadataBundle::parse(&text)?;
    info!(
        "Loaded {} objects of {} types from {}",
        bundle.object_count(),
        bundle.type_names().count(),
        path.display()
    );
    Ok(bundle)
}

/// Write a bundle pretty-printed to `path`.
pub fn save_bundle(bundle: &MetadataBundle, path: &Path) -> Result<()> {
    let bytes = bundle.to_pretty_bytes()?;
    fs::write(path, bytes).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved {}", path.display());
    Ok(())
}

/// Insert `suffix` before the `.json` extension of `input`'s file name.
///
/// A name without `.json` gets `suffix` and `.json` appended.
pub fn derived_path(input: &Path, suffix: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".json").unwrap_or(&file_name);
    input.with_file_name(format!("{}{}.json", stem, suffix))
}

/// Output path for a bundle whose primary locale became `new_locale`.
pub fn locale_output_path(input: &Path, new_locale: &str) -> PathBuf {
    derived_path(input, &format!("_{}", new_locale))
}

/// Output path for a bundle whose default identifiers were repointed.
pub fn defaults_output_path(input: &Path) -> PathBuf {
    derived_path(input, DEFAULTS_SUFFIX)
}

/// Save next to the input under a derived name. The input itself is never written.
pub fn save_derived(bundle: &MetadataBundle, input: &Path, output: &Path) -> Result<()> {
    if output == input {
        return Err(MetadataError::WouldOverwriteInput(input.to_path_buf()));
    }
    save_bundle(bundle, output)
}
