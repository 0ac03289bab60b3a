use crate::diagnostics::Warning;
use crate::dictionary::flags::{FlagMode, FlagSet, HIDDEN_HOMONYM_FLAG};
use crate::dictionary::{TableSet, TextTables};
use crate::Dictionary;

fn load(aff: &str, dic: &str) -> (Dictionary, Vec<Warning>) {
    let mut warnings = vec![];
    let dict = Dictionary::from_readers_with_sink(aff.as_bytes(), dic.as_bytes(), &mut warnings)
        .unwrap();
    (dict, warnings)
}

fn narrow(dict: &Dictionary) -> &TableSet<u8> {
    match dict.tables() {
        TextTables::Narrow(tables) => tables,
        TextTables::Wide(_) => panic!("expected narrow tables"),
    }
}

fn wide(dict: &Dictionary) -> &TableSet<char> {
    match dict.tables() {
        TextTables::Wide(tables) => tables,
        TextTables::Narrow(_) => panic!("expected wide tables"),
    }
}

#[test]
fn test_utf8_prefix_and_flags() {
    let (dict, warnings) = load("SET UTF-8\nFLAG UTF-8\nPFX A Y 1\nPFX A 0 un .\n", "1\nhappy/A");
    assert!(warnings.is_empty());
    assert_eq!(dict.flag_mode(), FlagMode::Utf8Bmp);
    assert_eq!(dict.encoding().name(), "UTF-8");
    assert_eq!(
        dict.words().find(b"happy"),
        Some(&FlagSet::new(vec![0x41]))
    );
    let tables = wide(&dict);
    let group = tables.prefixes.get(0x41);
    assert_eq!(group.len(), 1);
    assert!(group[0].cross_product());
    assert_eq!(group[0].appending(), &['u', 'n']);
    assert!(group[0].check_condition(&['h', 'a', 'p', 'p', 'y']));
    assert!(!group[0].check_condition(&[]));
}

#[test]
fn test_flag_aliases_resolve_in_word_list() {
    let (dict, warnings) = load("AF 2\nAF AB\nAF CD\n", "2\nfoo/1\nbar/2");
    assert!(warnings.is_empty());
    assert_eq!(
        dict.words().find(b"foo"),
        Some(&FlagSet::new(vec![0x41, 0x42]))
    );
    assert_eq!(
        dict.words().find(b"bar"),
        Some(&FlagSet::new(vec![0x43, 0x44]))
    );
}

#[test]
fn test_long_flags_key_the_affix_index() {
    let (dict, _) = load("FLAG long\nPFX aB Y 1\nPFX aB 0 re .\n", "1\nfile/aB");
    let flag = (u16::from(b'a') << 8) | u16::from(b'B');
    assert!(dict.words().find(b"file").unwrap().contains(flag));
    let tables = narrow(&dict);
    assert_eq!(tables.prefixes.get(flag).len(), 1);
}

#[test]
fn test_break_table_partition() {
    let (dict, _) = load("BREAK 2\nBREAK ^-\nBREAK -$\n", "0\n");
    let breaks = &narrow(&dict).break_table;
    assert_eq!(breaks.start_patterns(), &[b"-".to_vec()]);
    assert_eq!(breaks.end_patterns(), &[b"-".to_vec()]);
    assert!(breaks.middle_patterns().is_empty());
}

#[test]
fn test_replacement_table_longest_match() {
    let (dict, _) = load("REP 2\nREP a e\nREP th d\n", "0\n");
    let replacements = &narrow(&dict).replacements;
    assert_eq!(replacements.replace_copy(b"thanks"), b"denks");
}

#[test]
fn test_title_case_synthesizes_hidden_homonym() {
    let (dict, warnings) = load("FLAG UTF-8\nFORBIDDENWORD !\n", "1\nFoo");
    // UTF-8 flags in a non-UTF-8 file still decode, with a notice.
    assert!(warnings.contains(&Warning::EncodingMismatch { line: 2 }));
    assert_eq!(dict.options().forbiddenword_flag, 0x21);
    assert_eq!(dict.words().len(), 2);
    assert!(dict.words().equal_range(b"Foo").iter().all(|f| f.is_empty()));
    assert!(dict
        .words()
        .find(b"FOO")
        .unwrap()
        .contains(HIDDEN_HOMONYM_FLAG));
}

#[test]
fn test_empty_aff_gets_default_breaks() {
    let (dict, warnings) = load("", "0\n");
    assert!(warnings.is_empty());
    assert!(dict.words().is_empty());
    let tables = narrow(&dict);
    assert!(tables.replacements.is_empty());
    assert!(tables.prefixes.is_empty());
    assert!(tables.suffixes.is_empty());
    let breaks = &tables.break_table;
    assert_eq!(breaks.start_patterns(), &[b"-".to_vec()]);
    assert_eq!(breaks.end_patterns(), &[b"-".to_vec()]);
    assert_eq!(breaks.middle_patterns(), &[b"-".to_vec()]);
}

#[test]
fn test_escaped_slash_in_headword() {
    let (dict, _) = load("", "1\nun\\/escaped/A\n");
    assert_eq!(
        dict.words().find(b"un\\/escaped"),
        Some(&FlagSet::new(vec![0x41]))
    );
}

#[test]
fn test_same_flag_in_both_affix_tables() {
    // Prefixes and suffixes key separate indices; the same flag may use
    // different cross-product values across them.
    let (dict, warnings) = load("PFX A Y 1\nPFX A 0 un .\nSFX A N 1\nSFX A 0 s .\n", "0\n");
    assert!(warnings.is_empty());
    let tables = narrow(&dict);
    assert!(tables.prefixes.get(0x41)[0].cross_product());
    assert!(!tables.suffixes.get(0x41)[0].cross_product());
}

#[test]
fn test_ignore_and_scalar_strings() {
    let (dict, _) = load("IGNORE xyz\nTRY abc\nWORDCHARS .-\nLANG hu_HU\n", "0\n");
    assert_eq!(dict.language(), "hu_HU");
    assert_eq!(dict.options().try_chars, b"abc");
    assert_eq!(dict.options().wordchars, b".-");
    assert_eq!(narrow(&dict).ignored_chars, b"xyz");
}

#[test]
fn test_iconv_and_oconv_are_separate() {
    let (dict, _) = load(
        "ICONV 1\nICONV \u{2019} '\nOCONV 1\nOCONV ' \u{2019}\n",
        "0\n",
    );
    let tables = narrow(&dict);
    assert_eq!(tables.input_conversion.len(), 1);
    assert_eq!(tables.output_conversion.len(), 1);
}

#[test]
fn test_wide_tables_for_utf8_encoding() {
    let (dict, _) = load(
        "SET UTF-8\nSFX B Y 1\nSFX B 0 ök [^aeiou]\n",
        "1\nszáll/B",
    );
    let tables = wide(&dict);
    let group = tables.suffixes.get(u16::from(b'B'));
    assert_eq!(group.len(), 1);
    let word: Vec<char> = "száll".chars().collect();
    assert!(group[0].check_condition(&word));
    assert_eq!(
        group[0].to_derived_copy(&word),
        "szállök".chars().collect::<Vec<_>>()
    );
}

#[test]
fn test_morph_aliases_kept() {
    let (dict, _) = load("AM 1\nAM po:noun\n", "0\n");
    assert_eq!(dict.morph_aliases(), &[vec![b"po:noun".to_vec()]]);
}

#[test]
fn test_compound_options_roundtrip() {
    let (dict, _) = load(
        "COMPOUNDFLAG C\nCOMPOUNDMIN 1\nCHECKCOMPOUNDDUP\nCOMPOUNDRULE 1\nCOMPOUNDRULE CC\n",
        "0\n",
    );
    assert_eq!(dict.options().compound_flag, u16::from(b'C'));
    assert_eq!(dict.options().compound_min_length, 1);
    assert!(dict.options().compound_check_duplicate);
    assert_eq!(dict.compound_rules(), &[vec![0x43, 0x43]]);
}

#[test]
fn test_bom_is_consumed() {
    let mut aff = b"\xEF\xBB\xBF".to_vec();
    aff.extend_from_slice(b"SET UTF-8\n");
    let mut warnings = vec![];
    let dict =
        Dictionary::from_readers_with_sink(&aff[..], &b"0\n"[..], &mut warnings).unwrap();
    assert!(dict.encoding().is_utf8());
    assert!(warnings.is_empty());
}
