//! Locale catalog: the fixed list of locales offered as the current primary
//! locale of a bundle.
//!
//! The catalog only feeds selection lists. It is not derived from the bundle
//! and nothing validates a swap against it.

/// A locale the platform ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleEntry {
    /// Locale code as used in translation records (e.g. "fr", "pt_BR")
    pub code: &'static str,

    /// Display name (e.g. "French")
    pub name: &'static str,
}

impl LocaleEntry {
    /// Selection line, e.g. `fr: French`.
    pub fn choice_line(&self) -> String {
        format!("{}: {}", self.code, self.name)
    }
}

/// Locale conventionally stored in the primary fields of an export.
pub const DEFAULT_PRIMARY_LOCALE: &str = "en";

const LOCALES: &[LocaleEntry] = &[
    LocaleEntry { code: "ar", name: "Arabic" },
    LocaleEntry { code: "ar_EG", name: "Arabic (Egypt)" },
    LocaleEntry { code: "ar_IQ", name: "Arabic (Iraq)" },
    LocaleEntry { code: "ar_SD", name: "Arabic (Sudan)" },
    LocaleEntry { code: "bn", name: "Bengali" },
    LocaleEntry { code: "bi", name: "Bislama" },
    LocaleEntry { code: "my", name: "Burmese" },
    LocaleEntry { code: "zh", name: "Chinese" },
    LocaleEntry { code: "da", name: "Danish" },
    LocaleEntry { code: "en", name: "English" },
    LocaleEntry { code: "fr", name: "French" },
    LocaleEntry { code: "in_ID", name: "Indonesian (Indonesia)" },
    LocaleEntry { code: "km", name: "Khmer" },
    LocaleEntry { code: "rw", name: "Kinyarwanda" },
    LocaleEntry { code: "lo", name: "Lao" },
    LocaleEntry { code: "mn", name: "Mongolian" },
    LocaleEntry { code: "ne", name: "Nepali" },
    LocaleEntry { code: "pt", name: "Portuguese" },
    LocaleEntry { code: "pt_BR", name: "Portuguese (Brazil)" },
    LocaleEntry { code: "ps", name: "Pushto" },
    LocaleEntry { code: "ru", name: "Russian" },
    LocaleEntry { code: "es", name: "Spanish" },
    LocaleEntry { code: "sv", name: "Swedish" },
    LocaleEntry { code: "tg", name: "Tajik" },
    LocaleEntry { code: "tet", name: "Tetum" },
    LocaleEntry { code: "ur", name: "Urdu" },
    LocaleEntry { code: "vi", name: "Vietnamese" },
    LocaleEntry { code: "ckb", name: "ckb" },
    LocaleEntry { code: "prs", name: "prs" },
];

/// All catalog locales, in display order.
pub fn all_locales() -> &'static [LocaleEntry] {
    LOCALES
}

pub fn find_locale(code: &str) -> Option<&'static LocaleEntry> {
    LOCALES.iter().find(|l| l.code == code)
}

/// Extract the locale code from a selection line (`"fr: French"` -> `"fr"`).
pub fn code_from_choice(choice: &str) -> &str {
    choice.split(':').next().unwrap_or(choice).trim()
}
