//! Loaded dictionary snapshot and its lookup tables.

pub mod affix;
pub mod breaks;
pub mod encoding;
pub mod flags;
pub mod replacer;
pub mod word_map;

pub(crate) mod aff_parser;
pub(crate) mod dic_parser;
pub(crate) mod lines;

use std::io::Read;

use crate::diagnostics::{DiagSink, LogSink, Warning};
use crate::errors::Result;
use crate::text::TextUnit;
use affix::{AffixIndex, Prefix, Suffix};
use aff_parser::ParsedAff;
use breaks::BreakTable;
use encoding::Encoding;
use flags::{Flag, FlagMode, FlagSet};
use replacer::SubstrReplacer;
use word_map::WordMap;

/// Scalar options parsed from the affix file.
///
/// Booleans default to false, flags to 0 ("no flag"), and strings to
/// empty; the minimum compound-part length defaults to 3.
#[derive(Clone, Debug)]
pub struct AffOptions {
    /// COMPLEXPREFIXES: words may carry two prefixes.
    pub complex_prefixes: bool,
    /// ONLYMAXDIFF: restrict suggestions to the best n-gram matches.
    pub only_max_diff: bool,
    /// NOSPLITSUGS: never suggest splitting a word in two.
    pub no_split_suggestions: bool,
    /// SUGSWITHDOTS: keep trailing dots on suggestions.
    pub suggest_with_dots: bool,
    /// FORBIDWARN: treat warned words as forbidden.
    pub forbid_warn: bool,
    /// COMPOUNDMORESUFFIXES: allow two suffixes inside compounds.
    pub compound_more_suffixes: bool,
    /// CHECKCOMPOUNDDUP: forbid a word appearing twice in a compound.
    pub compound_check_duplicate: bool,
    /// CHECKCOMPOUNDREP: forbid compounds that a REP rule rewrites into
    /// a dictionary word.
    pub compound_check_rep: bool,
    /// CHECKCOMPOUNDCASE: forbid case changes at compound boundaries.
    pub compound_check_case: bool,
    /// CHECKCOMPOUNDTRIPLE: forbid triple letters at compound boundaries.
    pub compound_check_triple: bool,
    /// SIMPLIFIEDTRIPLE: permit the simplified two-letter form instead.
    pub compound_simplified_triple: bool,
    /// FULLSTRIP: affixes may strip an entire word.
    pub fullstrip: bool,
    /// CHECKSHARPS: treat ß/SS pairs as case variants.
    pub checksharps: bool,

    /// MAXCPDSUGS: maximum compound suggestions.
    pub max_compound_suggestions: i16,
    /// MAXNGRAMSUGS: maximum n-gram suggestions.
    pub max_ngram_suggestions: i16,
    /// MAXDIFF: n-gram similarity threshold.
    pub max_diff_factor: i16,
    /// COMPOUNDMIN: minimum length of a compound part.
    pub compound_min_length: i16,
    /// COMPOUNDWORDMAX: maximum number of parts in a compound.
    pub compound_max_word_count: i16,
    /// COMPOUNDSYLLABLE: maximum syllable count of a compound.
    pub compound_syllable_max: i16,
    /// COMPOUNDSYLLABLE: vowels used for syllable counting.
    pub compound_syllable_vowels: Vec<u8>,
    /// SYLLABLENUM: flags adjusting the syllable count.
    pub compound_syllable_num: FlagSet,

    /// NOSUGGEST: words never to suggest.
    pub nosuggest_flag: Flag,
    /// WARN: words to warn about.
    pub warn_flag: Flag,
    /// COMPOUNDFLAG: words usable anywhere in compounds.
    pub compound_flag: Flag,
    /// COMPOUNDBEGIN: words usable at the start of compounds.
    pub compound_begin_flag: Flag,
    /// COMPOUNDLAST: words usable at the end of compounds.
    pub compound_last_flag: Flag,
    /// COMPOUNDMIDDLE: words usable inside compounds.
    pub compound_middle_flag: Flag,
    /// COMPOUNDROOT: marks roots of compounds in the word list.
    pub compound_root_flag: Flag,
    /// ONLYINCOMPOUND: words valid only inside compounds.
    pub compound_onlyin_flag: Flag,
    /// COMPOUNDPERMITFLAG: affixes permitted inside compounds.
    pub compound_permit_flag: Flag,
    /// COMPOUNDFORBIDFLAG: affixes forbidden inside compounds.
    pub compound_forbid_flag: Flag,
    /// FORCEUCASE: compounds whose last part forces upper case.
    pub compound_force_uppercase_flag: Flag,
    /// CIRCUMFIX: affixes valid only as part of a circumfix.
    pub circumfix_flag: Flag,
    /// FORBIDDENWORD: marks non-words.
    pub forbiddenword_flag: Flag,
    /// KEEPCASE: words whose casing must not vary.
    pub keepcase_flag: Flag,
    /// NEEDAFFIX: words valid only with an affix.
    pub need_affix_flag: Flag,
    /// SUBSTANDARD: words excluded from suggestions and compounds.
    pub substandard_flag: Flag,

    /// KEY: keyboard layout, raw bytes in the file encoding.
    pub keyboard_layout: Vec<u8>,
    /// TRY: characters to try in suggestions, raw bytes.
    pub try_chars: Vec<u8>,
    /// WORDCHARS: extra word characters for tokenization, raw bytes.
    pub wordchars: Vec<u8>,
}

impl Default for AffOptions {
    fn default() -> Self {
        Self {
            complex_prefixes: false,
            only_max_diff: false,
            no_split_suggestions: false,
            suggest_with_dots: false,
            forbid_warn: false,
            compound_more_suffixes: false,
            compound_check_duplicate: false,
            compound_check_rep: false,
            compound_check_case: false,
            compound_check_triple: false,
            compound_simplified_triple: false,
            fullstrip: false,
            checksharps: false,
            max_compound_suggestions: 0,
            max_ngram_suggestions: 0,
            max_diff_factor: 0,
            compound_min_length: 3,
            compound_max_word_count: 0,
            compound_syllable_max: 0,
            compound_syllable_vowels: Vec::new(),
            compound_syllable_num: FlagSet::default(),
            nosuggest_flag: 0,
            warn_flag: 0,
            compound_flag: 0,
            compound_begin_flag: 0,
            compound_last_flag: 0,
            compound_middle_flag: 0,
            compound_root_flag: 0,
            compound_onlyin_flag: 0,
            compound_permit_flag: 0,
            compound_forbid_flag: 0,
            compound_force_uppercase_flag: 0,
            circumfix_flag: 0,
            forbiddenword_flag: 0,
            keepcase_flag: 0,
            need_affix_flag: 0,
            substandard_flag: 0,
            keyboard_layout: Vec::new(),
            try_chars: Vec::new(),
            wordchars: Vec::new(),
        }
    }
}

/// A CHECKCOMPOUNDPATTERN entry forbidding or rewriting a compound
/// boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompoundPattern {
    /// Text the first word must end with.
    pub first_word_end: Vec<u8>,
    /// Flag the first word must carry, or 0.
    pub first_word_flag: Flag,
    /// Text the second word must begin with.
    pub second_word_begin: Vec<u8>,
    /// Flag the second word must carry, or 0.
    pub second_word_flag: Flag,
    /// Replacement at the boundary, empty when the pattern only forbids.
    pub replacement: Vec<u8>,
}

/// One materialized set of lookup tables.
pub struct TableSet<U: TextUnit> {
    /// REP rewrite rules.
    pub replacements: SubstrReplacer<U>,
    /// ICONV input-normalization rules.
    pub input_conversion: SubstrReplacer<U>,
    /// OCONV output-normalization rules.
    pub output_conversion: SubstrReplacer<U>,
    /// BREAK patterns.
    pub break_table: BreakTable<U>,
    /// IGNORE characters.
    pub ignored_chars: Vec<U>,
    /// Prefix entries keyed by flag.
    pub prefixes: AffixIndex<Prefix<U>>,
    /// Suffix entries keyed by flag.
    pub suffixes: AffixIndex<Suffix<U>>,
}

impl<U: TextUnit> TableSet<U> {
    fn build(parsed: &ParsedAff, sink: &mut dyn DiagSink) -> Result<Self> {
        let pairs = |table: &[(Vec<u8>, Vec<u8>)]| -> Vec<(Vec<U>, Vec<U>)> {
            table
                .iter()
                .map(|(from, to)| (U::from_bytes(from), U::from_bytes(to)))
                .collect()
        };
        let mut prefixes = Vec::with_capacity(parsed.prefixes.len());
        for raw in &parsed.prefixes {
            match Prefix::new(
                raw.flag,
                raw.cross_product,
                U::from_bytes(&raw.stripping),
                U::from_bytes(&raw.appending),
                raw.flags.clone(),
                &raw.condition,
            ) {
                Ok(entry) => prefixes.push(entry),
                Err(_) => sink.warning(Warning::BadCondition { line: raw.line }),
            }
        }
        let mut suffixes = Vec::with_capacity(parsed.suffixes.len());
        for raw in &parsed.suffixes {
            match Suffix::new(
                raw.flag,
                raw.cross_product,
                U::from_bytes(&raw.stripping),
                U::from_bytes(&raw.appending),
                raw.flags.clone(),
                &raw.condition,
            ) {
                Ok(entry) => suffixes.push(entry),
                Err(_) => sink.warning(Warning::BadCondition { line: raw.line }),
            }
        }
        Ok(Self {
            replacements: SubstrReplacer::new(pairs(&parsed.replacements)),
            input_conversion: SubstrReplacer::new(pairs(&parsed.input_conversion)),
            output_conversion: SubstrReplacer::new(pairs(&parsed.output_conversion)),
            break_table: BreakTable::new(
                parsed
                    .break_patterns
                    .iter()
                    .map(|p| U::from_bytes(p))
                    .collect(),
            ),
            ignored_chars: U::from_bytes(&parsed.ignore_chars),
            prefixes: AffixIndex::from_entries(prefixes)?,
            suffixes: AffixIndex::from_entries(suffixes)?,
        })
    }
}

/// The text-representation split of the lookup tables.
///
/// Exactly one variant is materialized per load: `Wide` when the file
/// encoding is UTF-8, `Narrow` for single-byte encodings.
pub enum TextTables {
    /// Tables over raw bytes in the file encoding.
    Narrow(TableSet<u8>),
    /// Tables over Unicode code points.
    Wide(TableSet<char>),
}

/// An immutable snapshot of a loaded aff/dic pair.
///
/// Built once by [`Dictionary::from_readers`]; never mutated afterwards.
pub struct Dictionary {
    flag_mode: FlagMode,
    encoding: Encoding,
    language: String,
    options: AffOptions,
    tables: TextTables,
    compound_rules: Vec<Vec<Flag>>,
    compound_patterns: Vec<CompoundPattern>,
    map_chars: Vec<Vec<u8>>,
    phonetic_rules: Vec<(Vec<u8>, Vec<u8>)>,
    flag_aliases: Vec<FlagSet>,
    morph_aliases: Vec<Vec<Vec<u8>>>,
    words: WordMap,
}

impl Dictionary {
    /// Loads a dictionary from affix and word-list readers, forwarding
    /// warnings to the `log` crate.
    ///
    /// # Errors
    ///
    /// [`LegatoError`](crate::errors::LegatoError) is returned when a
    /// stream fails, the word list has no readable count header, or one
    /// flag is declared with conflicting cross-product values.
    pub fn from_readers<A, D>(aff_rdr: A, dic_rdr: D) -> Result<Self>
    where
        A: Read,
        D: Read,
    {
        Self::from_readers_with_sink(aff_rdr, dic_rdr, &mut LogSink)
    }

    /// Loads a dictionary, reporting warnings to `sink`.
    ///
    /// The affix file is parsed first; its encoding and flag mode drive
    /// the word-list parser. Warnings never abort the load.
    ///
    /// # Errors
    ///
    /// See [`Dictionary::from_readers`].
    pub fn from_readers_with_sink<A, D>(
        aff_rdr: A,
        dic_rdr: D,
        sink: &mut dyn DiagSink,
    ) -> Result<Self>
    where
        A: Read,
        D: Read,
    {
        let parsed = aff_parser::parse(aff_rdr, sink)?;
        let words = dic_parser::parse(dic_rdr, &parsed, sink)?;
        let tables = if parsed.encoding.is_utf8() {
            TextTables::Wide(TableSet::build(&parsed, sink)?)
        } else {
            TextTables::Narrow(TableSet::build(&parsed, sink)?)
        };
        Ok(Self {
            flag_mode: parsed.flag_mode,
            encoding: parsed.encoding,
            language: String::from_utf8_lossy(&parsed.language).into_owned(),
            options: parsed.options,
            tables,
            compound_rules: parsed.compound_rules,
            compound_patterns: parsed.compound_patterns,
            map_chars: parsed.map_chars,
            phonetic_rules: parsed.phonetic_rules,
            flag_aliases: parsed.flag_aliases,
            morph_aliases: parsed.morph_aliases,
            words,
        })
    }

    /// The flag encoding declared by FLAG.
    #[inline(always)]
    pub fn flag_mode(&self) -> FlagMode {
        self.flag_mode
    }

    /// The normalized file encoding declared by SET.
    #[inline(always)]
    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// The language code declared by LANG.
    #[inline(always)]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Scalar options.
    #[inline(always)]
    pub fn options(&self) -> &AffOptions {
        &self.options
    }

    /// The narrow or wide lookup tables.
    #[inline(always)]
    pub fn tables(&self) -> &TextTables {
        &self.tables
    }

    /// COMPOUNDRULE patterns; `?` and `*` appear as their code units.
    #[inline(always)]
    pub fn compound_rules(&self) -> &[Vec<Flag>] {
        &self.compound_rules
    }

    /// CHECKCOMPOUNDPATTERN entries.
    #[inline(always)]
    pub fn compound_patterns(&self) -> &[CompoundPattern] {
        &self.compound_patterns
    }

    /// MAP groups of related characters, raw bytes per entry.
    #[inline(always)]
    pub fn map_chars(&self) -> &[Vec<u8>] {
        &self.map_chars
    }

    /// PHONE rules, raw byte pairs.
    #[inline(always)]
    pub fn phonetic_rules(&self) -> &[(Vec<u8>, Vec<u8>)] {
        &self.phonetic_rules
    }

    /// The AF flag-alias table.
    #[inline(always)]
    pub fn flag_aliases(&self) -> &[FlagSet] {
        &self.flag_aliases
    }

    /// The AM morphological-alias table.
    #[inline(always)]
    pub fn morph_aliases(&self) -> &[Vec<Vec<u8>>] {
        &self.morph_aliases
    }

    /// The headword map.
    #[inline(always)]
    pub fn words(&self) -> &WordMap {
        &self.words
    }
}
