//! Translation handling for metadata bundles.
//!
//! # Architecture
//!
//! - `property`: Closed set of translatable property tokens and their fields
//! - `stats`: Per-locale translation counts for a bundle
//! - `swap`: Promotes one locale's translations into the primary fields
//! - `catalog`: Fixed list of platform locales for selection lists
//!
//! # Example
//!
//! ```rust,ignore
//! use metadata_swap::i18n::{collect_stats, swap_translations};
//!
//! let stats = collect_stats(&bundle);
//! println!("{:?}", stats.choice_lines());
//!
//! let summary = swap_translations(&mut bundle, "en", "fr");
//! ```

pub mod catalog;
mod property;
mod stats;
mod swap;

pub use catalog::{all_locales, find_locale, LocaleEntry, DEFAULT_PRIMARY_LOCALE};
pub use property::{TranslatableProperty, SHORT_NAME_MAX_CHARS};
pub use stats::{collect_stats, LocaleStats};
pub use swap::{swap_translations, SwapSummary};
