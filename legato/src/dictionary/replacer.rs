//! Longest-match substring rewriting.

use std::cmp::Ordering;

use crate::text::TextUnit;

/// A table of `(from, to)` rewrite rules applied longest-match, leftmost.
///
/// Rules are kept sorted by `from`. Duplicate keys keep their first
/// occurrence and an empty key is dropped.
#[derive(Debug)]
pub struct SubstrReplacer<U: TextUnit> {
    table: Vec<(Vec<U>, Vec<U>)>,
}

impl<U: TextUnit> Default for SubstrReplacer<U> {
    fn default() -> Self {
        Self { table: Vec::new() }
    }
}

impl<U: TextUnit> SubstrReplacer<U> {
    /// Builds a rule table from pairs in file order.
    pub fn new(mut table: Vec<(Vec<U>, Vec<U>)>) -> Self {
        table.sort_by(|a, b| a.0.cmp(&b.0));
        table.dedup_by(|a, b| a.0 == b.0);
        if table.first().map_or(false, |rule| rule.0.is_empty()) {
            table.remove(0);
        }
        Self { table }
    }

    /// The rules, sorted ascending by `from`.
    #[inline(always)]
    pub fn rules(&self) -> &[(Vec<U>, Vec<U>)] {
        &self.table
    }

    /// Number of rules.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the table has no rules.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Rewrites `text` in place.
    ///
    /// The text is scanned left to right. At each position the longest
    /// rule whose key is a prefix of the remaining text is spliced in;
    /// the scan then continues after the inserted replacement.
    pub fn replace(&self, text: &mut Vec<U>) {
        if self.table.is_empty() {
            return;
        }
        let mut i = 0;
        while i < text.len() {
            match self.find_match(&text[i..]) {
                Some(rule) => {
                    let (from, to) = &self.table[rule];
                    let from_len = from.len();
                    let to_len = to.len();
                    text.splice(i..i + from_len, to.iter().copied());
                    i += to_len;
                }
                None => i += 1,
            }
        }
    }

    /// Returns a rewritten copy of `text`.
    pub fn replace_copy(&self, text: &[U]) -> Vec<U> {
        let mut out = text.to_vec();
        self.replace(&mut out);
        out
    }

    /// Finds the longest rule whose key is a prefix of `rest` by repeated
    /// upper-bound searches, tightening the range while prefixes keep
    /// matching.
    fn find_match(&self, rest: &[U]) -> Option<usize> {
        let mut lo = 0;
        let mut last_match = None;
        loop {
            let ub = lo
                + self.table[lo..]
                    .partition_point(|rule| cmp_prefix_of(&rule.0, rest) != Ordering::Greater);
            if ub == lo {
                break;
            }
            if cmp_prefix_of(&self.table[ub - 1].0, rest) == Ordering::Equal {
                last_match = Some(ub - 1);
                lo = ub;
            } else {
                break;
            }
        }
        last_match
    }
}

/// Compares `p` against the front of `of`; `Equal` iff `p` is a prefix.
fn cmp_prefix_of<U: TextUnit>(p: &[U], of: &[U]) -> Ordering {
    let n = p.len().min(of.len());
    match p[..n].cmp(&of[..n]) {
        Ordering::Equal if p.len() > n => Ordering::Greater,
        ordering => ordering,
    }
}
