//! Prefix and suffix entries and their flag-keyed tables.

use crate::dictionary::flags::{Flag, FlagSet};
use crate::errors::{LegatoError, Result};
use crate::text::{Anchor, TextUnit};

/// A prefix rule: strip `stripping` from the head of a root and put
/// `appending` in its place, under a start-anchored condition.
#[derive(Debug)]
pub struct Prefix<U: TextUnit> {
    flag: Flag,
    cross_product: bool,
    stripping: Vec<U>,
    appending: Vec<U>,
    flags: FlagSet,
    condition: U::Condition,
}

impl<U: TextUnit> Prefix<U> {
    /// Compiles the condition and builds the entry.
    ///
    /// # Errors
    ///
    /// Returns the regex error when `condition` does not compile.
    pub fn new(
        flag: Flag,
        cross_product: bool,
        stripping: Vec<U>,
        appending: Vec<U>,
        flags: FlagSet,
        condition: &[u8],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            flag,
            cross_product,
            stripping,
            appending,
            flags,
            condition: U::compile_condition(condition, Anchor::Start)?,
        })
    }

    /// The flag licensing this entry.
    #[inline(always)]
    pub fn flag(&self) -> Flag {
        self.flag
    }

    /// Whether this entry may combine with suffixes on one word.
    #[inline(always)]
    pub fn cross_product(&self) -> bool {
        self.cross_product
    }

    /// Text stripped from the root.
    #[inline(always)]
    pub fn stripping(&self) -> &[U] {
        &self.stripping
    }

    /// Text appended to the derived form.
    #[inline(always)]
    pub fn appending(&self) -> &[U] {
        &self.appending
    }

    /// Continuation flags of the derived form.
    #[inline(always)]
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Returns true if the condition matches `word`.
    #[inline(always)]
    pub fn check_condition(&self, word: &[U]) -> bool {
        U::condition_matches(&self.condition, word)
    }

    /// Converts a derived word into its root in place, replacing the
    /// appended head with the stripped text.
    pub fn to_root(&self, word: &mut Vec<U>) {
        let n = self.appending.len().min(word.len());
        word.splice(..n, self.stripping.iter().copied());
    }

    /// Like [`Prefix::to_root`], on a copy.
    pub fn to_root_copy(&self, word: &[U]) -> Vec<U> {
        let mut word = word.to_vec();
        self.to_root(&mut word);
        word
    }

    /// Converts a root into its derived form in place, replacing the
    /// stripped head with the appended text. The caller must ensure the
    /// word is at least as long as the stripped text.
    pub fn to_derived(&self, word: &mut Vec<U>) {
        let n = self.stripping.len().min(word.len());
        word.splice(..n, self.appending.iter().copied());
    }

    /// Like [`Prefix::to_derived`], on a copy.
    pub fn to_derived_copy(&self, word: &[U]) -> Vec<U> {
        let mut word = word.to_vec();
        self.to_derived(&mut word);
        word
    }
}

/// A suffix rule: strip `stripping` from the tail of a root and put
/// `appending` in its place, under an end-anchored condition.
#[derive(Debug)]
pub struct Suffix<U: TextUnit> {
    flag: Flag,
    cross_product: bool,
    stripping: Vec<U>,
    appending: Vec<U>,
    flags: FlagSet,
    condition: U::Condition,
}

impl<U: TextUnit> Suffix<U> {
    /// Compiles the condition and builds the entry.
    ///
    /// # Errors
    ///
    /// Returns the regex error when `condition` does not compile.
    pub fn new(
        flag: Flag,
        cross_product: bool,
        stripping: Vec<U>,
        appending: Vec<U>,
        flags: FlagSet,
        condition: &[u8],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            flag,
            cross_product,
            stripping,
            appending,
            flags,
            condition: U::compile_condition(condition, Anchor::End)?,
        })
    }

    /// The flag licensing this entry.
    #[inline(always)]
    pub fn flag(&self) -> Flag {
        self.flag
    }

    /// Whether this entry may combine with prefixes on one word.
    #[inline(always)]
    pub fn cross_product(&self) -> bool {
        self.cross_product
    }

    /// Text stripped from the root.
    #[inline(always)]
    pub fn stripping(&self) -> &[U] {
        &self.stripping
    }

    /// Text appended to the derived form.
    #[inline(always)]
    pub fn appending(&self) -> &[U] {
        &self.appending
    }

    /// Continuation flags of the derived form.
    #[inline(always)]
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Returns true if the condition matches `word`.
    #[inline(always)]
    pub fn check_condition(&self, word: &[U]) -> bool {
        U::condition_matches(&self.condition, word)
    }

    /// Converts a derived word into its root in place, replacing the
    /// appended tail with the stripped text.
    pub fn to_root(&self, word: &mut Vec<U>) {
        let n = self.appending.len().min(word.len());
        let at = word.len() - n;
        word.splice(at.., self.stripping.iter().copied());
    }

    /// Like [`Suffix::to_root`], on a copy.
    pub fn to_root_copy(&self, word: &[U]) -> Vec<U> {
        let mut word = word.to_vec();
        self.to_root(&mut word);
        word
    }

    /// Converts a root into its derived form in place, replacing the
    /// stripped tail with the appended text. The caller must ensure the
    /// word is at least as long as the stripped text.
    pub fn to_derived(&self, word: &mut Vec<U>) {
        let n = self.stripping.len().min(word.len());
        let at = word.len() - n;
        word.splice(at.., self.appending.iter().copied());
    }

    /// Like [`Suffix::to_derived`], on a copy.
    pub fn to_derived_copy(&self, word: &[U]) -> Vec<U> {
        let mut word = word.to_vec();
        self.to_derived(&mut word);
        word
    }
}

/// Common surface of prefix and suffix entries used by [`AffixIndex`].
pub trait AffixEntry {
    /// The flag licensing this entry.
    fn flag(&self) -> Flag;

    /// The entry's cross-product discipline.
    fn cross_product(&self) -> bool;
}

impl<U: TextUnit> AffixEntry for Prefix<U> {
    fn flag(&self) -> Flag {
        self.flag
    }

    fn cross_product(&self) -> bool {
        self.cross_product
    }
}

impl<U: TextUnit> AffixEntry for Suffix<U> {
    fn flag(&self) -> Flag {
        self.flag
    }

    fn cross_product(&self) -> bool {
        self.cross_product
    }
}

/// Affix entries keyed by their flag.
///
/// Entries sharing a flag keep their insertion order, and all of them
/// must agree on the cross-product value.
#[derive(Debug)]
pub struct AffixIndex<T> {
    table: Vec<T>,
}

impl<T> Default for AffixIndex<T> {
    fn default() -> Self {
        Self { table: Vec::new() }
    }
}

impl<T: AffixEntry> AffixIndex<T> {
    /// Builds the index from entries in file order.
    ///
    /// # Errors
    ///
    /// [`LegatoError::CrossProduct`] when entries under one flag disagree
    /// on the cross-product value.
    pub fn from_entries(mut entries: Vec<T>) -> Result<Self> {
        entries.sort_by_key(|e| e.flag());
        for pair in entries.windows(2) {
            if pair[0].flag() == pair[1].flag()
                && pair[0].cross_product() != pair[1].cross_product()
            {
                return Err(LegatoError::cross_product(pair[0].flag()));
            }
        }
        Ok(Self { table: entries })
    }

    /// All entries registered under `flag`, in insertion order.
    pub fn get(&self, flag: Flag) -> &[T] {
        let lo = self.table.partition_point(|e| e.flag() < flag);
        let hi = self.table.partition_point(|e| e.flag() <= flag);
        &self.table[lo..hi]
    }

    /// Iterates over all entries, grouped by flag.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.table.iter()
    }

    /// Total number of entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the index has no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(flag: Flag, cross: bool, strip: &str, append: &str) -> Prefix<u8> {
        Prefix::new(
            flag,
            cross,
            strip.as_bytes().to_vec(),
            append.as_bytes().to_vec(),
            FlagSet::default(),
            b".",
        )
        .unwrap()
    }

    fn suffix(flag: Flag, cross: bool, strip: &str, append: &str, cond: &[u8]) -> Suffix<u8> {
        Suffix::new(
            flag,
            cross,
            strip.as_bytes().to_vec(),
            append.as_bytes().to_vec(),
            FlagSet::default(),
            cond,
        )
        .unwrap()
    }

    #[test]
    fn test_prefix_derive_and_root() {
        let pfx = prefix(0x41, true, "", "un");
        let derived = pfx.to_derived_copy(b"happy");
        assert_eq!(derived, b"unhappy");
        assert_eq!(pfx.to_root_copy(&derived), b"happy");
    }

    #[test]
    fn test_prefix_with_stripping() {
        let pfx = prefix(0x41, true, "a", "un");
        assert_eq!(pfx.to_derived_copy(b"atypical"), b"untypical");
        assert_eq!(pfx.to_root_copy(b"untypical"), b"atypical");
    }

    #[test]
    fn test_suffix_derive_and_root() {
        let sfx = suffix(0x42, true, "y", "ier", b"[^aeiou]y");
        assert!(sfx.check_condition(b"happy"));
        assert!(!sfx.check_condition(b"play"));
        assert_eq!(sfx.to_derived_copy(b"happy"), b"happier");
        assert_eq!(sfx.to_root_copy(b"happier"), b"happy");
    }

    #[test]
    fn test_roundtrip_law() {
        let sfx = suffix(0x42, false, "", "s", b".");
        for word in [&b"word"[..], b"a", b"xyzzy"] {
            assert_eq!(sfx.to_root_copy(&sfx.to_derived_copy(word)), word);
        }
    }

    #[test]
    fn test_index_groups_by_flag() {
        let entries = vec![
            prefix(0x42, true, "", "re"),
            prefix(0x41, true, "", "un"),
            prefix(0x42, true, "", "pre"),
        ];
        let index = AffixIndex::from_entries(entries).unwrap();
        assert_eq!(index.len(), 3);
        let group = index.get(0x42);
        assert_eq!(group.len(), 2);
        // Insertion order within the group survives the sort.
        assert_eq!(group[0].appending(), b"re");
        assert_eq!(group[1].appending(), b"pre");
        assert!(index.get(0x43).is_empty());
    }

    #[test]
    fn test_index_rejects_cross_product_conflict() {
        let entries = vec![
            prefix(0x41, true, "", "un"),
            prefix(0x41, false, "", "non"),
        ];
        assert!(AffixIndex::from_entries(entries).is_err());
    }

    #[test]
    fn test_wide_entries() {
        let sfx = Suffix::<char>::new(
            0x42,
            true,
            vec![],
            vec!['ö', 'k'],
            FlagSet::default(),
            b".",
        )
        .unwrap();
        let derived = sfx.to_derived_copy(&['s', 'z', 'ó']);
        assert_eq!(derived, vec!['s', 'z', 'ó', 'ö', 'k']);
    }
}
