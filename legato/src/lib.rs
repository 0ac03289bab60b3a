//! # Legato
//!
//! Legato loads Hunspell-compatible affix (`.aff`) and word-list (`.dic`)
//! files into an immutable in-memory snapshot optimized for spellcheck
//! lookups: flag-keyed prefix and suffix tables, substring replacers,
//! break-pattern tables, compound rules, and a headword map carrying each
//! word's flag set.
//!
//! The loader itself is single-threaded and synchronous; the returned
//! [`Dictionary`] is never mutated afterwards and can be shared freely
//! between readers.
//!
//! ## Examples
//!
//! ```
//! let aff = "SET UTF-8\nPFX A Y 1\nPFX A 0 un .";
//! let dic = "1\nhappy/A";
//!
//! let dict = legato::Dictionary::from_readers(aff.as_bytes(), dic.as_bytes()).unwrap();
//! assert!(dict.words().find(b"happy").is_some());
//! ```
#![deny(missing_docs)]

pub mod diagnostics;
pub mod dictionary;
pub mod errors;
pub mod text;

#[cfg(test)]
mod tests;

pub use dictionary::Dictionary;
