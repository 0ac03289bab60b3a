//! Line-oriented parser for word-list files.

use std::io::Read;

use crate::diagnostics::{DiagSink, Warning};
use crate::dictionary::aff_parser::ParsedAff;
use crate::dictionary::encoding::{validate_utf8, TextConv};
use crate::dictionary::flags::{self, FlagSet};
use crate::dictionary::lines::Lines;
use crate::dictionary::word_map::WordMap;
use crate::errors::{LegatoError, Result};

/// Parses a word-list file into a word map, using the flag settings and
/// encoding discovered in the affix file.
pub(crate) fn parse<R: Read>(
    rdr: R,
    aff: &ParsedAff,
    sink: &mut dyn DiagSink,
) -> Result<WordMap> {
    let conv = match aff.encoding.conv() {
        Ok(conv) => conv,
        Err(_) => {
            sink.warning(Warning::UnknownEncoding {
                name: aff.encoding.name().to_string(),
            });
            TextConv::Latin1
        }
    };
    let utf8 = aff.encoding.is_utf8();
    let mode = aff.flag_mode;
    let mut lines = Lines::new(rdr);

    let Some((num, first)) = lines.next_line()? else {
        return Err(LegatoError::invalid_format(
            "dic",
            "the word list is missing its count header",
        ));
    };
    if utf8 && !validate_utf8(first) {
        sink.warning(Warning::InvalidUtf8 { line: num });
    }
    let approximate_size = first
        .split(|b: &u8| b.is_ascii_whitespace())
        .find(|t| !t.is_empty())
        .and_then(|t| std::str::from_utf8(t).ok())
        .and_then(|t| t.parse::<usize>().ok());
    let Some(approximate_size) = approximate_size else {
        return Err(LegatoError::invalid_format(
            "dic",
            "the first line must be a decimal word count",
        ));
    };
    let mut words = WordMap::with_capacity(approximate_size);

    while let Some((num, line)) = lines.next_line()? {
        if utf8 && !validate_utf8(line) {
            sink.warning(Warning::InvalidUtf8 { line: num });
        }
        let (word, flags) = if let Some(pos) = find_unescaped_slash(line) {
            let field = line[pos + 1..]
                .split(|b: &u8| b.is_ascii_whitespace())
                .find(|t| !t.is_empty());
            match flags::decode_flags_or_alias(field, mode, utf8, &aff.flag_aliases, num, sink) {
                Some(decoded) => (&line[..pos], FlagSet::new(decoded)),
                // A malformed flag field skips the line.
                None => continue,
            }
        } else if let Some(tab) = line.iter().position(|&b| b == b'\t') {
            // Morphological data follows the tab.
            (&line[..tab], FlagSet::default())
        } else {
            (&line[..end_of_word(line)], FlagSet::default())
        };
        if word.is_empty() {
            continue;
        }
        words.insert(word, flags, &conv);
    }
    Ok(words)
}

/// Finds the first `/` not preceded by a backslash. A slash in leading
/// position counts as unescaped.
fn find_unescaped_slash(line: &[u8]) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = line[from..].iter().position(|&b| b == b'/').map(|p| p + from) {
        if pos == 0 || line[pos - 1] != b'\\' {
            return Some(pos);
        }
        from = pos + 1;
    }
    None
}

/// Scans for the earliest space followed by a token shaped like a
/// two-letter morphological tag (`xx:`); the word ends at that space.
fn end_of_word(line: &[u8]) -> usize {
    if line.len() < 4 {
        return line.len();
    }
    let mut from = 0;
    loop {
        let Some(space) = line[from..].iter().position(|&b| b == b' ').map(|p| p + from) else {
            return line.len();
        };
        let Some(start) = line[space..]
            .iter()
            .position(|&b| b != b' ')
            .map(|p| p + space)
        else {
            return line.len();
        };
        if start > line.len() - 3 {
            return line.len();
        }
        if line[start].is_ascii_lowercase()
            && line[start + 1].is_ascii_lowercase()
            && line[start + 2] == b':'
        {
            return space;
        }
        from = start;
    }
}
