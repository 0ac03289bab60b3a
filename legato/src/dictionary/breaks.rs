//! Break-pattern tables for spell-and-retry splitting.

use crate::text::TextUnit;

/// Break patterns partitioned into start-anchored, end-anchored, and
/// middle regions.
///
/// Anchor characters are stripped from the stored patterns; patterns that
/// are empty after stripping are dropped. Within each region, patterns
/// keep their file order.
#[derive(Debug)]
pub struct BreakTable<U: TextUnit> {
    table: Vec<Vec<U>>,
    start_end: usize,
    end_end: usize,
}

impl<U: TextUnit> Default for BreakTable<U> {
    fn default() -> Self {
        Self {
            table: Vec::new(),
            start_end: 0,
            end_end: 0,
        }
    }
}

impl<U: TextUnit> BreakTable<U> {
    /// Builds a table from patterns in file order.
    pub fn new(patterns: Vec<Vec<U>>) -> Self {
        let mut start = vec![];
        let mut end = vec![];
        let mut middle = vec![];
        for mut pattern in patterns {
            if pattern.first() == Some(&U::CARET) {
                pattern.remove(0);
                if !pattern.is_empty() {
                    start.push(pattern);
                }
            } else if pattern.last() == Some(&U::DOLLAR) {
                pattern.pop();
                if !pattern.is_empty() {
                    end.push(pattern);
                }
            } else if !pattern.is_empty() {
                middle.push(pattern);
            }
        }
        let start_end = start.len();
        let end_end = start_end + end.len();
        let mut table = start;
        table.append(&mut end);
        table.append(&mut middle);
        Self {
            table,
            start_end,
            end_end,
        }
    }

    /// Start-anchored patterns, carets stripped.
    #[inline(always)]
    pub fn start_patterns(&self) -> &[Vec<U>] {
        &self.table[..self.start_end]
    }

    /// End-anchored patterns, dollars stripped.
    #[inline(always)]
    pub fn end_patterns(&self) -> &[Vec<U>] {
        &self.table[self.start_end..self.end_end]
    }

    /// Unanchored middle patterns.
    #[inline(always)]
    pub fn middle_patterns(&self) -> &[Vec<U>] {
        &self.table[self.end_end..]
    }

    /// Total number of stored patterns.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the table has no patterns.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Tries to split `word` at break patterns, spelling the remainder
    /// with `spell`.
    ///
    /// Start patterns strip the head, end patterns strip the tail, and
    /// middle patterns split at their leftmost occurrence with both
    /// halves required to spell. Returns true on the first success.
    pub fn break_and_spell<F>(&self, word: &[U], mut spell: F) -> bool
    where
        F: FnMut(&[U]) -> bool,
    {
        for pattern in self.start_patterns() {
            if word.starts_with(pattern) && spell(&word[pattern.len()..]) {
                return true;
            }
        }
        for pattern in self.end_patterns() {
            if word.ends_with(pattern) && spell(&word[..word.len() - pattern.len()]) {
                return true;
            }
        }
        for pattern in self.middle_patterns() {
            if let Some(i) = find_pattern(word, pattern) {
                if i > 0
                    && i + pattern.len() < word.len()
                    && spell(&word[..i])
                    && spell(&word[i + pattern.len()..])
                {
                    return true;
                }
            }
        }
        false
    }
}

fn find_pattern<U: TextUnit>(word: &[U], pattern: &[U]) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > word.len() {
        return None;
    }
    word.windows(pattern.len()).position(|w| w == pattern)
}
