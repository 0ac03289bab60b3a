//! Text units shared by the narrow and wide table variants.
//!
//! A dictionary is materialized either over raw bytes in the file
//! encoding (single-byte encodings) or over Unicode code points (UTF-8).
//! Table types are generic over the unit so that lengths and offsets
//! always count units of the active representation.

use std::fmt::Debug;

/// Where an affix condition is anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Anchored at the start of the word (prefixes).
    Start,
    /// Anchored at the end of the word (suffixes).
    End,
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for char {}
}

/// A unit of text: a raw byte in the file encoding or a code point.
///
/// Strings are plain `Vec`s of units, so slice operations behave the same
/// in both representations.
pub trait TextUnit: sealed::Sealed + Copy + Ord + Debug + 'static {
    /// A compiled anchored condition over this representation.
    type Condition: Debug;

    /// The `^` unit.
    const CARET: Self;

    /// The `$` unit.
    const DOLLAR: Self;

    /// Converts raw bytes from the source file into units. The narrow
    /// representation is the identity; the wide one decodes UTF-8
    /// leniently.
    fn from_bytes(bytes: &[u8]) -> Vec<Self>;

    /// Compiles `pattern` into a condition anchored per `anchor`.
    fn compile_condition(pattern: &[u8], anchor: Anchor) -> Result<Self::Condition, regex::Error>;

    /// Checks `word` against a compiled condition.
    fn condition_matches(condition: &Self::Condition, word: &[Self]) -> bool;
}

impl TextUnit for u8 {
    type Condition = regex::bytes::Regex;

    const CARET: u8 = b'^';
    const DOLLAR: u8 = b'$';

    fn from_bytes(bytes: &[u8]) -> Vec<u8> {
        bytes.to_vec()
    }

    fn compile_condition(pattern: &[u8], anchor: Anchor) -> Result<Self::Condition, regex::Error> {
        let mut pat = String::with_capacity(pattern.len() + 1);
        if anchor == Anchor::Start {
            pat.push('^');
        }
        for &b in pattern {
            if b.is_ascii() {
                pat.push(char::from(b));
            } else {
                // Matches the raw byte; requires the Unicode flag off.
                pat.push_str(&format!(r"\x{:02X}", b));
            }
        }
        if anchor == Anchor::End {
            pat.push('$');
        }
        regex::bytes::RegexBuilder::new(&pat).unicode(false).build()
    }

    fn condition_matches(condition: &Self::Condition, word: &[u8]) -> bool {
        condition.is_match(word)
    }
}

impl TextUnit for char {
    type Condition = regex::Regex;

    const CARET: char = '^';
    const DOLLAR: char = '$';

    fn from_bytes(bytes: &[u8]) -> Vec<char> {
        String::from_utf8_lossy(bytes).chars().collect()
    }

    fn compile_condition(pattern: &[u8], anchor: Anchor) -> Result<Self::Condition, regex::Error> {
        let body = String::from_utf8_lossy(pattern);
        let pat = match anchor {
            Anchor::Start => format!("^{}", body),
            Anchor::End => format!("{}$", body),
        };
        regex::Regex::new(&pat)
    }

    fn condition_matches(condition: &Self::Condition, word: &[char]) -> bool {
        let word: String = word.iter().collect();
        condition.is_match(&word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_condition() {
        let cond = <u8 as TextUnit>::compile_condition(b"[^aeiou]y", Anchor::End).unwrap();
        assert!(u8::condition_matches(&cond, b"happy"));
        assert!(!u8::condition_matches(&cond, b"play"));
    }

    #[test]
    fn test_narrow_condition_high_bytes() {
        // 0xE9 is e-acute in Latin-1.
        let cond = <u8 as TextUnit>::compile_condition(&[b'[', 0xE9, b']', b'r'], Anchor::End).unwrap();
        assert!(u8::condition_matches(&cond, &[b'p', b'a', b'y', 0xE9, b'r']));
        assert!(!u8::condition_matches(&cond, b"payer"));
    }

    #[test]
    fn test_wide_condition() {
        let cond = <char as TextUnit>::compile_condition(".".as_bytes(), Anchor::Start).unwrap();
        assert!(char::condition_matches(&cond, &['h', 'a', 'p', 'p', 'y']));
        assert!(!char::condition_matches(&cond, &[]));
    }

    #[test]
    fn test_wide_from_bytes() {
        assert_eq!(char::from_bytes("héj".as_bytes()), vec!['h', 'é', 'j']);
    }
}
