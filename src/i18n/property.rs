//! Translatable properties: the closed set of translation tokens the swap
//! engine knows how to map onto object fields.

use crate::error::MetadataError;
use std::fmt;
use std::str::FromStr;

/// Platform length limit on `shortName`.
pub const SHORT_NAME_MAX_CHARS: usize = 50;

/// A property token carried by a translation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslatableProperty {
    Name,
    ShortName,
    Description,
}

impl TranslatableProperty {
    pub const ALL: [TranslatableProperty; 3] = [
        TranslatableProperty::Name,
        TranslatableProperty::ShortName,
        TranslatableProperty::Description,
    ];

    /// Token as it appears in `translations[].property`.
    pub fn token(&self) -> &'static str {
        match self {
            TranslatableProperty::Name => "NAME",
            TranslatableProperty::ShortName => "SHORT_NAME",
            TranslatableProperty::Description => "DESCRIPTION",
        }
    }

    /// Object field holding the primary-locale value.
    pub fn field_name(&self) -> &'static str {
        match self {
            TranslatableProperty::Name => "name",
            TranslatableProperty::ShortName => "shortName",
            TranslatableProperty::Description => "description",
        }
    }

    /// Maximum length a promoted value may have, if the field is limited.
    pub fn max_chars(&self) -> Option<usize> {
        match self {
            TranslatableProperty::ShortName => Some(SHORT_NAME_MAX_CHARS),
            _ => None,
        }
    }

    pub fn from_token(token: &str) -> Result<Self, MetadataError> {
        Self::ALL
            .into_iter()
            .find(|p| p.token() == token)
            .ok_or_else(|| MetadataError::UnknownTranslatableProperty(token.to_string()))
    }
}

impl FromStr for TranslatableProperty {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

impl fmt::Display for TranslatableProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tokens_map_to_fields() {
        assert_eq!(TranslatableProperty::from_token("NAME").unwrap().field_name(), "name");
        assert_eq!(
            TranslatableProperty::from_token("SHORT_NAME").unwrap().field_name(),
            "shortName"
        );
        assert_eq!(
            TranslatableProperty::from_token("DESCRIPTION").unwrap().field_name(),
            "description"
        );
    }

    #[test]
    fn test_unknown_token_is_an_error() {
        let err = TranslatableProperty::from_token("FORM_NAME").unwrap_err();
        assert!(matches!(err, MetadataError::UnknownTranslatableProperty(ref t) if t == "FORM_NAME"));
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert!("name".parse::<TranslatableProperty>().is_err());
    }

    #[test]
    fn test_only_short_name_is_length_limited() {
        assert_eq!(TranslatableProperty::ShortName.max_chars(), Some(50));
        assert_eq!(TranslatableProperty::Name.max_chars(), None);
        assert_eq!(TranslatableProperty::Description.max_chars(), None);
    }

    #[test]
    fn test_display_is_token() {
        assert_eq!(TranslatableProperty::ShortName.to_string(), "SHORT_NAME");
    }
}
