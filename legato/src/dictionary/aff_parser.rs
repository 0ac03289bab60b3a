//! Line-oriented parser for affix files.
//!
//! The parser fills intermediate vectors of raw byte strings; the
//! narrow/wide table split happens afterwards, once the encoding is
//! final.

use std::io::Read;

use hashbrown::HashMap;

use crate::diagnostics::{DiagSink, Warning};
use crate::dictionary::encoding::{validate_utf8, Encoding};
use crate::dictionary::flags::{self, Flag, FlagMode, FlagSet};
use crate::dictionary::lines::Lines;
use crate::dictionary::{AffOptions, CompoundPattern};
use crate::errors::Result;

/// An affix entry before condition compilation and the narrow/wide
/// split.
pub(crate) struct RawAffix {
    pub(crate) flag: Flag,
    pub(crate) cross_product: bool,
    pub(crate) stripping: Vec<u8>,
    pub(crate) appending: Vec<u8>,
    pub(crate) flags: FlagSet,
    pub(crate) condition: Vec<u8>,
    pub(crate) line: usize,
}

/// Everything read from an affix file, before table finalization.
#[derive(Default)]
pub(crate) struct ParsedAff {
    pub(crate) encoding: Encoding,
    pub(crate) flag_mode: FlagMode,
    pub(crate) language: Vec<u8>,
    pub(crate) ignore_chars: Vec<u8>,
    pub(crate) options: AffOptions,
    pub(crate) prefixes: Vec<RawAffix>,
    pub(crate) suffixes: Vec<RawAffix>,
    pub(crate) break_patterns: Vec<Vec<u8>>,
    pub(crate) break_seen: bool,
    pub(crate) replacements: Vec<(Vec<u8>, Vec<u8>)>,
    pub(crate) input_conversion: Vec<(Vec<u8>, Vec<u8>)>,
    pub(crate) output_conversion: Vec<(Vec<u8>, Vec<u8>)>,
    pub(crate) phonetic_rules: Vec<(Vec<u8>, Vec<u8>)>,
    pub(crate) map_chars: Vec<Vec<u8>>,
    pub(crate) flag_aliases: Vec<FlagSet>,
    pub(crate) morph_aliases: Vec<Vec<Vec<u8>>>,
    pub(crate) compound_rules: Vec<Vec<Flag>>,
    pub(crate) compound_patterns: Vec<CompoundPattern>,
}

/// Parses an affix file.
///
/// Unknown commands, malformed entries, and flag problems are reported
/// to `sink`; only stream failures abort the parse.
pub(crate) fn parse<R: Read>(rdr: R, sink: &mut dyn DiagSink) -> Result<ParsedAff> {
    let mut data = ParsedAff::default();
    // Remaining entry counts per counted table, and per affix header.
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut affix_headers: HashMap<(bool, Flag), (bool, usize)> = HashMap::new();
    let mut lines = Lines::new(rdr);

    while let Some((num, line)) = lines.next_line()? {
        if data.encoding.is_utf8() && !validate_utf8(line) {
            sink.warning(Warning::InvalidUtf8 { line: num });
        }
        let mut tokens = line
            .split(|b: &u8| b.is_ascii_whitespace())
            .filter(|t: &&[u8]| !t.is_empty());
        let command = match tokens.next() {
            Some(t) if !t.starts_with(b"#") => t.to_ascii_uppercase(),
            _ => continue,
        };
        let mode = data.flag_mode;
        let utf8 = data.encoding.is_utf8();
        match command.as_slice() {
            b"PFX" | b"SFX" => {
                let is_prefix = command.as_slice() == b"PFX";
                parse_affix(
                    is_prefix,
                    &mut tokens,
                    &mut data,
                    &mut affix_headers,
                    num,
                    sink,
                );
            }
            b"LANG" | b"IGNORE" | b"KEY" | b"TRY" | b"WORDCHARS" => {
                let slot = match command.as_slice() {
                    b"LANG" => &mut data.language,
                    b"IGNORE" => &mut data.ignore_chars,
                    b"KEY" => &mut data.options.keyboard_layout,
                    b"TRY" => &mut data.options.try_chars,
                    _ => &mut data.options.wordchars,
                };
                if !slot.is_empty() {
                    sink.warning(Warning::SetTwice {
                        line: num,
                        command: display_command(&command),
                    });
                } else if let Some(t) = tokens.next() {
                    *slot = t.to_vec();
                }
            }
            b"COMPLEXPREFIXES" => data.options.complex_prefixes = true,
            b"ONLYMAXDIFF" => data.options.only_max_diff = true,
            b"NOSPLITSUGS" => data.options.no_split_suggestions = true,
            b"SUGSWITHDOTS" => data.options.suggest_with_dots = true,
            b"FORBIDWARN" => data.options.forbid_warn = true,
            b"COMPOUNDMORESUFFIXES" => data.options.compound_more_suffixes = true,
            b"CHECKCOMPOUNDDUP" => data.options.compound_check_duplicate = true,
            b"CHECKCOMPOUNDREP" => data.options.compound_check_rep = true,
            b"CHECKCOMPOUNDCASE" => data.options.compound_check_case = true,
            b"CHECKCOMPOUNDTRIPLE" => data.options.compound_check_triple = true,
            b"SIMPLIFIEDTRIPLE" => data.options.compound_simplified_triple = true,
            b"FULLSTRIP" => data.options.fullstrip = true,
            b"CHECKSHARPS" => data.options.checksharps = true,
            b"MAXCPDSUGS" | b"MAXNGRAMSUGS" | b"MAXDIFF" | b"COMPOUNDMIN"
            | b"COMPOUNDWORDMAX" => {
                let slot = match command.as_slice() {
                    b"MAXCPDSUGS" => &mut data.options.max_compound_suggestions,
                    b"MAXNGRAMSUGS" => &mut data.options.max_ngram_suggestions,
                    b"MAXDIFF" => &mut data.options.max_diff_factor,
                    b"COMPOUNDMIN" => &mut data.options.compound_min_length,
                    _ => &mut data.options.compound_max_word_count,
                };
                match tokens.next().and_then(parse_short) {
                    Some(value) => *slot = value,
                    None => sink.warning(Warning::MalformedLine { line: num }),
                }
            }
            b"NOSUGGEST" | b"WARN" | b"COMPOUNDFLAG" | b"COMPOUNDBEGIN" | b"COMPOUNDLAST"
            | b"COMPOUNDMIDDLE" | b"COMPOUNDROOT" | b"ONLYINCOMPOUND" | b"COMPOUNDPERMITFLAG"
            | b"COMPOUNDFORBIDFLAG" | b"FORCEUCASE" | b"CIRCUMFIX" | b"FORBIDDENWORD"
            | b"KEEPCASE" | b"NEEDAFFIX" | b"SUBSTANDARD" => {
                let slot = match command.as_slice() {
                    b"NOSUGGEST" => &mut data.options.nosuggest_flag,
                    b"WARN" => &mut data.options.warn_flag,
                    b"COMPOUNDFLAG" => &mut data.options.compound_flag,
                    b"COMPOUNDBEGIN" => &mut data.options.compound_begin_flag,
                    b"COMPOUNDLAST" => &mut data.options.compound_last_flag,
                    b"COMPOUNDMIDDLE" => &mut data.options.compound_middle_flag,
                    b"COMPOUNDROOT" => &mut data.options.compound_root_flag,
                    b"ONLYINCOMPOUND" => &mut data.options.compound_onlyin_flag,
                    b"COMPOUNDPERMITFLAG" => &mut data.options.compound_permit_flag,
                    b"COMPOUNDFORBIDFLAG" => &mut data.options.compound_forbid_flag,
                    b"FORCEUCASE" => &mut data.options.compound_force_uppercase_flag,
                    b"CIRCUMFIX" => &mut data.options.circumfix_flag,
                    b"FORBIDDENWORD" => &mut data.options.forbiddenword_flag,
                    b"KEEPCASE" => &mut data.options.keepcase_flag,
                    b"NEEDAFFIX" => &mut data.options.need_affix_flag,
                    _ => &mut data.options.substandard_flag,
                };
                *slot = flags::decode_single_flag(tokens.next(), mode, utf8, num, sink);
            }
            b"SET" => {
                if data.encoding.is_empty() {
                    if let Some(t) = tokens.next() {
                        data.encoding = Encoding::new(&String::from_utf8_lossy(t));
                    } else {
                        sink.warning(Warning::MalformedLine { line: num });
                    }
                } else {
                    sink.warning(Warning::SetTwice {
                        line: num,
                        command: display_command(&command),
                    });
                }
            }
            b"FLAG" => {
                let value = tokens.next().map(<[u8]>::to_ascii_uppercase);
                match value.as_deref() {
                    Some(b"LONG") => data.flag_mode = FlagMode::DoubleChar,
                    Some(b"NUM") => data.flag_mode = FlagMode::DecimalNumber,
                    Some(b"UTF-8") => data.flag_mode = FlagMode::Utf8Bmp,
                    other => sink.warning(Warning::UnknownFlagType {
                        line: num,
                        value: String::from_utf8_lossy(other.unwrap_or_default()).into_owned(),
                    }),
                }
            }
            b"MAP" => {
                parse_vector_entry(
                    &mut counts,
                    &command,
                    &mut tokens,
                    &mut data.map_chars,
                    num,
                    sink,
                    |t, _| t.next().map(<[u8]>::to_vec),
                );
            }
            b"REP" | b"PHONE" | b"ICONV" | b"OCONV" => {
                let vec = match command.as_slice() {
                    b"REP" => &mut data.replacements,
                    b"PHONE" => &mut data.phonetic_rules,
                    b"ICONV" => &mut data.input_conversion,
                    _ => &mut data.output_conversion,
                };
                parse_vector_entry(&mut counts, &command, &mut tokens, vec, num, sink, |t, _| {
                    let from = t.next()?.to_vec();
                    let to = t.next()?.to_vec();
                    Some((from, to))
                });
            }
            b"AF" => {
                parse_vector_entry(
                    &mut counts,
                    &command,
                    &mut tokens,
                    &mut data.flag_aliases,
                    num,
                    sink,
                    |t, s| flags::decode_flags(t.next(), mode, utf8, num, s).map(FlagSet::new),
                );
            }
            b"AM" => {
                parse_vector_entry(
                    &mut counts,
                    &command,
                    &mut tokens,
                    &mut data.morph_aliases,
                    num,
                    sink,
                    |t, _| Some(t.map(<[u8]>::to_vec).collect()),
                );
            }
            b"BREAK" => {
                data.break_seen = true;
                parse_vector_entry(
                    &mut counts,
                    &command,
                    &mut tokens,
                    &mut data.break_patterns,
                    num,
                    sink,
                    |t, _| t.next().map(<[u8]>::to_vec),
                );
            }
            b"CHECKCOMPOUNDPATTERN" => {
                parse_vector_entry(
                    &mut counts,
                    &command,
                    &mut tokens,
                    &mut data.compound_patterns,
                    num,
                    sink,
                    |t, s| {
                        let (end, end_flag) = split_slash(t.next()?);
                        let first_word_flag = end_flag
                            .map(|p| flags::decode_single_flag(Some(p), mode, utf8, num, s))
                            .unwrap_or(0);
                        let (begin, begin_flag) = split_slash(t.next()?);
                        let second_word_flag = begin_flag
                            .map(|p| flags::decode_single_flag(Some(p), mode, utf8, num, s))
                            .unwrap_or(0);
                        let replacement = t.next().map(<[u8]>::to_vec).unwrap_or_default();
                        Some(CompoundPattern {
                            first_word_end: end.to_vec(),
                            first_word_flag,
                            second_word_begin: begin.to_vec(),
                            second_word_flag,
                            replacement,
                        })
                    },
                );
            }
            b"COMPOUNDRULE" => {
                parse_vector_entry(
                    &mut counts,
                    &command,
                    &mut tokens,
                    &mut data.compound_rules,
                    num,
                    sink,
                    |t, s| parse_compound_rule(t.next(), mode, utf8, num, s),
                );
            }
            b"COMPOUNDSYLLABLE" => {
                match tokens.next().and_then(parse_short) {
                    Some(value) => data.options.compound_syllable_max = value,
                    None => sink.warning(Warning::MalformedLine { line: num }),
                }
                if let Some(t) = tokens.next() {
                    data.options.compound_syllable_vowels = t.to_vec();
                }
            }
            b"SYLLABLENUM" => {
                if let Some(decoded) = flags::decode_flags(tokens.next(), mode, utf8, num, sink) {
                    data.options.compound_syllable_num = FlagSet::new(decoded);
                }
            }
            _ => sink.warning(Warning::UnknownCommand {
                line: num,
                command: display_command(&command),
            }),
        }
    }

    if !data.break_seen {
        data.break_patterns = vec![b"-".to_vec(), b"^-".to_vec(), b"-$".to_vec()];
    }
    Ok(data)
}

/// Handles one line of a counted table.
///
/// The first line of a family carries the remaining entry count; payload
/// lines consume one count each and extra lines are discarded with a
/// warning.
fn parse_vector_entry<'a, T, I, F>(
    counts: &mut HashMap<String, usize>,
    command: &[u8],
    tokens: &mut I,
    vec: &mut Vec<T>,
    line: usize,
    sink: &mut dyn DiagSink,
    parse: F,
) where
    I: Iterator<Item = &'a [u8]>,
    F: FnOnce(&mut I, &mut dyn DiagSink) -> Option<T>,
{
    let key = display_command(command);
    if let Some(remaining) = counts.get_mut(&key) {
        if *remaining == 0 {
            sink.warning(Warning::ExtraEntry { line, command: key });
            return;
        }
        *remaining -= 1;
        match parse(tokens, &mut *sink) {
            Some(entry) => vec.push(entry),
            None => sink.warning(Warning::MalformedLine { line }),
        }
    } else {
        match tokens.next().and_then(parse_usize) {
            Some(count) => {
                counts.insert(key, count);
            }
            None => {
                sink.warning(Warning::ZeroCount {
                    line,
                    command: key.clone(),
                });
                counts.insert(key, 0);
            }
        }
    }
}

/// Handles one PFX or SFX line.
///
/// The first line for a flag registers `(cross product, count)`; later
/// lines for the same flag populate entries until the count is used up.
fn parse_affix<'a, I>(
    is_prefix: bool,
    tokens: &mut I,
    data: &mut ParsedAff,
    headers: &mut HashMap<(bool, Flag), (bool, usize)>,
    num: usize,
    sink: &mut dyn DiagSink,
) where
    I: Iterator<Item = &'a [u8]>,
{
    let mode = data.flag_mode;
    let utf8 = data.encoding.is_utf8();
    let flag = flags::decode_single_flag(tokens.next(), mode, utf8, num, sink);
    if flag == 0 {
        return;
    }
    let key = (is_prefix, flag);
    if let Some((cross, remaining)) = headers.get_mut(&key) {
        if *remaining == 0 {
            sink.warning(Warning::ExtraEntry {
                line: num,
                command: if is_prefix { "PFX" } else { "SFX" }.to_string(),
            });
            return;
        }
        *remaining -= 1;
        let cross = *cross;
        let Some(stripping) = tokens.next() else {
            sink.warning(Warning::MalformedLine { line: num });
            return;
        };
        let mut stripping = stripping.to_vec();
        if stripping == b"0" {
            stripping.clear();
        }
        let Some(append_token) = tokens.next() else {
            sink.warning(Warning::MalformedLine { line: num });
            return;
        };
        let (appending, flag_part) = split_slash(append_token);
        let continuation = match flag_part {
            Some(part) => {
                match flags::decode_flags_or_alias(
                    Some(part),
                    mode,
                    utf8,
                    &data.flag_aliases,
                    num,
                    sink,
                ) {
                    Some(decoded) => FlagSet::new(decoded),
                    // A malformed flag field drops the whole entry.
                    None => return,
                }
            }
            None => FlagSet::default(),
        };
        let mut appending = appending.to_vec();
        if appending == b"0" {
            appending.clear();
        }
        let condition = tokens.next().unwrap_or(b".").to_vec();
        let entry = RawAffix {
            flag,
            cross_product: cross,
            stripping,
            appending,
            flags: continuation,
            condition,
            line: num,
        };
        // Trailing morphological fields are consumed with the line.
        if is_prefix {
            data.prefixes.push(entry);
        } else {
            data.suffixes.push(entry);
        }
    } else {
        let cross = tokens.next().map(|t| t == b"Y");
        let count = tokens.next().and_then(parse_usize);
        match (cross, count) {
            (Some(cross), Some(count)) => {
                headers.insert(key, (cross, count));
            }
            (cross, _) => {
                sink.warning(Warning::AffixHeader { line: num });
                headers.insert(key, (cross.unwrap_or(false), 0));
            }
        }
    }
}

/// Parses one COMPOUNDRULE pattern into a flag sequence.
///
/// Single-char and UTF-8 modes read the token as a plain flag sequence,
/// with `?` and `*` passing through as their code units. Long and
/// numeric modes use the wrapped forms `(XX)` and `(NNNN)`, each
/// optionally followed by `?` or `*`.
fn parse_compound_rule(
    token: Option<&[u8]>,
    mode: FlagMode,
    utf8: bool,
    line: usize,
    sink: &mut dyn DiagSink,
) -> Option<Vec<Flag>> {
    match mode {
        FlagMode::SingleChar | FlagMode::Utf8Bmp => {
            flags::decode_flags(token, mode, utf8, line, sink)
        }
        FlagMode::DoubleChar => {
            let token = token?;
            let re = regex::bytes::RegexBuilder::new(r"\((..)\)([?*]?)")
                .unicode(false)
                .build()
                .unwrap();
            let mut rule = vec![];
            for cap in re.captures_iter(token) {
                let pair = &cap[1];
                let value = (u32::from(pair[0]) << 8) | u32::from(pair[1]);
                flags::push_flag(&mut rule, value, line, sink);
                if let Some(meta) = cap.get(2).filter(|m| !m.as_bytes().is_empty()) {
                    rule.push(Flag::from(meta.as_bytes()[0]));
                }
            }
            Some(rule)
        }
        FlagMode::DecimalNumber => {
            let token = token?;
            let re = regex::bytes::RegexBuilder::new(r"\(([0-9]+)\)([?*]?)")
                .unicode(false)
                .build()
                .unwrap();
            let mut rule = vec![];
            for cap in re.captures_iter(token) {
                let mut value = 0u32;
                for &b in &cap[1] {
                    value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
                }
                flags::push_flag(&mut rule, value, line, sink);
                if let Some(meta) = cap.get(2).filter(|m| !m.as_bytes().is_empty()) {
                    rule.push(Flag::from(meta.as_bytes()[0]));
                }
            }
            Some(rule)
        }
    }
}

fn split_slash(token: &[u8]) -> (&[u8], Option<&[u8]>) {
    match token.iter().position(|&b| b == b'/') {
        Some(pos) => (&token[..pos], Some(&token[pos + 1..])),
        None => (token, None),
    }
}

fn parse_usize(token: &[u8]) -> Option<usize> {
    std::str::from_utf8(token).ok()?.parse().ok()
}

fn parse_short(token: &[u8]) -> Option<i16> {
    std::str::from_utf8(token).ok()?.parse().ok()
}

fn display_command(command: &[u8]) -> String {
    String::from_utf8_lossy(command).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(aff: &str) -> (ParsedAff, Vec<Warning>) {
        let mut sink = vec![];
        let data = parse(aff.as_bytes(), &mut sink).unwrap();
        (data, sink)
    }

    #[test]
    fn test_empty_input_gets_default_breaks() {
        let (data, warnings) = parse_str("");
        assert!(warnings.is_empty());
        assert_eq!(
            data.break_patterns,
            vec![b"-".to_vec(), b"^-".to_vec(), b"-$".to_vec()]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let (data, warnings) = parse_str("\n# comment\n   # indented\nTRY abc\n");
        assert!(warnings.is_empty());
        assert_eq!(data.options.try_chars, b"abc");
    }

    #[test]
    fn test_set_and_flag() {
        let (data, warnings) = parse_str("SET utf8\nFLAG long\n");
        assert!(warnings.is_empty());
        assert!(data.encoding.is_utf8());
        assert_eq!(data.flag_mode, FlagMode::DoubleChar);
    }

    #[test]
    fn test_set_twice_warns() {
        let (data, warnings) = parse_str("SET UTF-8\nSET ISO8859-2\n");
        assert!(data.encoding.is_utf8());
        assert_eq!(
            warnings,
            vec![Warning::SetTwice {
                line: 2,
                command: "SET".to_string()
            }]
        );
    }

    #[test]
    fn test_unknown_flag_type() {
        let (data, warnings) = parse_str("FLAG short\n");
        assert_eq!(data.flag_mode, FlagMode::SingleChar);
        assert_eq!(
            warnings,
            vec![Warning::UnknownFlagType {
                line: 1,
                value: "SHORT".to_string()
            }]
        );
    }

    #[test]
    fn test_scalar_strings_first_wins() {
        let (data, warnings) = parse_str("TRY abc\nTRY xyz\n");
        assert_eq!(data.options.try_chars, b"abc");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_booleans_and_shorts() {
        let (data, _) = parse_str("FULLSTRIP\nCHECKSHARPS\nCOMPOUNDMIN 2\nMAXDIFF 5\n");
        assert!(data.options.fullstrip);
        assert!(data.options.checksharps);
        assert_eq!(data.options.compound_min_length, 2);
        assert_eq!(data.options.max_diff_factor, 5);
    }

    #[test]
    fn test_flag_valued_commands() {
        let (data, _) = parse_str("FORBIDDENWORD !\nKEEPCASE K\nNOSUGGEST n\n");
        assert_eq!(data.options.forbiddenword_flag, 0x21);
        assert_eq!(data.options.keepcase_flag, 0x4B);
        assert_eq!(data.options.nosuggest_flag, 0x6E);
    }

    #[test]
    fn test_rep_table() {
        let (data, warnings) = parse_str("REP 2\nREP a e\nREP th d\n");
        assert!(warnings.is_empty());
        assert_eq!(
            data.replacements,
            vec![
                (b"a".to_vec(), b"e".to_vec()),
                (b"th".to_vec(), b"d".to_vec()),
            ]
        );
    }

    #[test]
    fn test_rep_extra_entries_warn() {
        let (data, warnings) = parse_str("REP 1\nREP a e\nREP th d\n");
        assert_eq!(data.replacements.len(), 1);
        assert_eq!(
            warnings,
            vec![Warning::ExtraEntry {
                line: 3,
                command: "REP".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_count_discards_family() {
        let (data, warnings) = parse_str("REP x y\nREP a e\n");
        assert!(data.replacements.is_empty());
        assert_eq!(warnings.len(), 2);
        assert_eq!(
            warnings[0],
            Warning::ZeroCount {
                line: 1,
                command: "REP".to_string()
            }
        );
    }

    #[test]
    fn test_af_aliases() {
        let (data, warnings) = parse_str("AF 2\nAF AB\nAF CD\n");
        assert!(warnings.is_empty());
        assert_eq!(data.flag_aliases.len(), 2);
        assert_eq!(data.flag_aliases[0].as_slice(), &[0x41, 0x42]);
        assert_eq!(data.flag_aliases[1].as_slice(), &[0x43, 0x44]);
    }

    #[test]
    fn test_am_aliases() {
        let (data, _) = parse_str("AM 1\nAM po:noun st:word\n");
        assert_eq!(
            data.morph_aliases,
            vec![vec![b"po:noun".to_vec(), b"st:word".to_vec()]]
        );
    }

    #[test]
    fn test_affix_entries() {
        let (data, warnings) =
            parse_str("PFX A Y 1\nPFX A 0 un .\nSFX B N 2\nSFX B y ier [^aeiou]y\nSFX B 0 s .\n");
        assert!(warnings.is_empty());
        assert_eq!(data.prefixes.len(), 1);
        let pfx = &data.prefixes[0];
        assert_eq!(pfx.flag, 0x41);
        assert!(pfx.cross_product);
        assert_eq!(pfx.stripping, b"");
        assert_eq!(pfx.appending, b"un");
        assert_eq!(pfx.condition, b".");
        assert_eq!(data.suffixes.len(), 2);
        let sfx = &data.suffixes[0];
        assert_eq!(sfx.flag, 0x42);
        assert!(!sfx.cross_product);
        assert_eq!(sfx.stripping, b"y");
        assert_eq!(sfx.appending, b"ier");
        assert_eq!(sfx.condition, b"[^aeiou]y");
    }

    #[test]
    fn test_affix_entry_with_continuation_flags() {
        let (data, _) = parse_str("SFX S Y 1\nSFX S 0 s/AB .\n");
        assert_eq!(data.suffixes[0].flags.as_slice(), &[0x41, 0x42]);
        assert_eq!(data.suffixes[0].appending, b"s");
    }

    #[test]
    fn test_affix_entry_missing_condition_defaults_to_dot() {
        let (data, _) = parse_str("SFX S Y 1\nSFX S 0 s\n");
        assert_eq!(data.suffixes[0].condition, b".");
    }

    #[test]
    fn test_affix_header_missing_count() {
        let (data, warnings) = parse_str("PFX A Y\nPFX A 0 un .\n");
        assert!(data.prefixes.is_empty());
        assert_eq!(warnings[0], Warning::AffixHeader { line: 1 });
        assert_eq!(
            warnings[1],
            Warning::ExtraEntry {
                line: 2,
                command: "PFX".to_string()
            }
        );
    }

    #[test]
    fn test_affix_extra_entries_warn() {
        let (data, warnings) = parse_str("PFX A Y 1\nPFX A 0 un .\nPFX A 0 non .\n");
        assert_eq!(data.prefixes.len(), 1);
        assert_eq!(
            warnings,
            vec![Warning::ExtraEntry {
                line: 3,
                command: "PFX".to_string()
            }]
        );
    }

    #[test]
    fn test_affix_double_char_flag() {
        let (data, _) = parse_str("FLAG long\nPFX aB Y 1\nPFX aB 0 re .\n");
        assert_eq!(data.prefixes[0].flag, 0x6142);
    }

    #[test]
    fn test_compound_rule_single_char() {
        let (data, _) = parse_str("COMPOUNDRULE 1\nCOMPOUNDRULE AB*C?\n");
        assert_eq!(
            data.compound_rules,
            vec![vec![0x41, 0x42, 0x2A, 0x43, 0x3F]]
        );
    }

    #[test]
    fn test_compound_rule_long_mode() {
        let (data, _) = parse_str("FLAG long\nCOMPOUNDRULE 1\nCOMPOUNDRULE (aa)(bb)*(cc)?\n");
        assert_eq!(
            data.compound_rules,
            vec![vec![0x6161, 0x6262, 0x2A, 0x6363, 0x3F]]
        );
    }

    #[test]
    fn test_compound_rule_numeric_mode() {
        let (data, warnings) =
            parse_str("FLAG num\nCOMPOUNDRULE 1\nCOMPOUNDRULE (101)(202)*(70000)\n");
        assert_eq!(data.compound_rules, vec![vec![101, 202, 0x2A]]);
        assert_eq!(warnings, vec![Warning::FlagSyntax { line: 3 }]);
    }

    #[test]
    fn test_compound_pattern() {
        let (data, _) = parse_str("CHECKCOMPOUNDPATTERN 1\nCHECKCOMPOUNDPATTERN o/X y/Z s\n");
        let pattern = &data.compound_patterns[0];
        assert_eq!(pattern.first_word_end, b"o");
        assert_eq!(pattern.first_word_flag, 0x58);
        assert_eq!(pattern.second_word_begin, b"y");
        assert_eq!(pattern.second_word_flag, 0x5A);
        assert_eq!(pattern.replacement, b"s");
    }

    #[test]
    fn test_compound_syllable() {
        let (data, _) = parse_str("COMPOUNDSYLLABLE 8 aeiou\nSYLLABLENUM AB\n");
        assert_eq!(data.options.compound_syllable_max, 8);
        assert_eq!(data.options.compound_syllable_vowels, b"aeiou");
        assert_eq!(data.options.compound_syllable_num.as_slice(), &[0x41, 0x42]);
    }

    #[test]
    fn test_break_table_and_flag() {
        let (data, _) = parse_str("BREAK 2\nBREAK ^-\nBREAK -$\n");
        assert!(data.break_seen);
        assert_eq!(data.break_patterns, vec![b"^-".to_vec(), b"-$".to_vec()]);
    }

    #[test]
    fn test_unknown_command_warns() {
        let (_, warnings) = parse_str("FROBNICATE 3\n");
        assert_eq!(
            warnings,
            vec![Warning::UnknownCommand {
                line: 1,
                command: "FROBNICATE".to_string()
            }]
        );
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        let (data, _) = parse_str("set UTF-8\npfx A Y 1\npfx A 0 un .\n");
        assert!(data.encoding.is_utf8());
        assert_eq!(data.prefixes.len(), 1);
    }
}
