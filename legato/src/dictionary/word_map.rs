//! Headword lookup with hidden-homonym synthesis.

use hashbrown::HashMap;

use crate::dictionary::encoding::{classify_casing, to_upper, Casing, TextConv};
use crate::dictionary::flags::{FlagSet, HIDDEN_HOMONYM_FLAG};

/// A multi-valued map from headword bytes to flag sets.
///
/// Headwords are keyed by their raw bytes in the file encoding. Title-
/// and camel-cased words additionally synthesize a hidden homonym under
/// their upper-cased form, tagged with [`HIDDEN_HOMONYM_FLAG`].
#[derive(Debug, Default)]
pub struct WordMap {
    map: HashMap<Vec<u8>, Vec<FlagSet>>,
    len: usize,
}

impl WordMap {
    /// Creates a map pre-sized for about `capacity` headwords.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            len: 0,
        }
    }

    /// Inserts `word` with `flags`, applying the casing rules.
    ///
    /// All-caps words overwrite a previously synthesized hidden homonym
    /// under the same key; title- and camel-cased words insert themselves
    /// and synthesize a hidden homonym under their upper-cased form when
    /// none exists yet.
    pub(crate) fn insert(&mut self, word: &[u8], flags: FlagSet, conv: &TextConv) {
        let text = conv.decode(word);
        match classify_casing(&text) {
            Casing::AllUpper => {
                let entries = self.map.entry(word.to_vec()).or_default();
                match entries
                    .iter_mut()
                    .find(|f| f.contains(HIDDEN_HOMONYM_FLAG))
                {
                    Some(hidden) => *hidden = flags,
                    None => {
                        entries.push(flags);
                        self.len += 1;
                    }
                }
            }
            Casing::Title | Casing::Camel => {
                let upper = conv.encode(&to_upper(&text));
                self.push(word.to_vec(), flags.clone());
                let entries = self.map.entry(upper).or_default();
                if !entries.iter().any(|f| f.contains(HIDDEN_HOMONYM_FLAG)) {
                    let mut hidden = flags;
                    hidden.insert(HIDDEN_HOMONYM_FLAG);
                    entries.push(hidden);
                    self.len += 1;
                }
            }
            _ => self.push(word.to_vec(), flags),
        }
    }

    fn push(&mut self, word: Vec<u8>, flags: FlagSet) {
        self.map.entry(word).or_default().push(flags);
        self.len += 1;
    }

    /// All flag sets stored under `word`, in insertion order.
    pub fn equal_range(&self, word: &[u8]) -> &[FlagSet] {
        self.map.get(word).map_or(&[][..], Vec::as_slice)
    }

    /// The first flag set stored under `word`.
    pub fn find(&self, word: &[u8]) -> Option<&FlagSet> {
        self.equal_range(word).first()
    }

    /// Like [`WordMap::equal_range`], keyed through the word's UTF-8
    /// bytes.
    pub fn equal_range_str(&self, word: &str) -> &[FlagSet] {
        self.equal_range(word.as_bytes())
    }

    /// Like [`WordMap::find`], keyed through the word's UTF-8 bytes.
    pub fn find_str(&self, word: &str) -> Option<&FlagSet> {
        self.find(word.as_bytes())
    }

    /// Number of entries, counting homonyms separately.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map has no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over `(headword, flag set)` entries in no particular
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &FlagSet)> {
        self.map
            .iter()
            .flat_map(|(word, sets)| sets.iter().map(move |f| (word.as_slice(), f)))
    }
}
