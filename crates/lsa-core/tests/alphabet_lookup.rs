use std::str::FromStr;

use lsa_core::{AlphabetName, AlphabetSet, LsaError};

#[test]
fn index_lookup_is_case_sensitive_value_equality() {
    let set = AlphabetSet::items_letterstring();
    let latin = set.get(AlphabetName::Latin);
    assert_eq!(latin.index_of("a").unwrap(), 0);
    assert_eq!(latin.index_of("o").unwrap(), 14);
    assert!(latin.index_of("A").is_err());
}

#[test]
fn unknown_symbol_is_a_structured_alphabet_error() {
    let set = AlphabetSet::items_letterstring();
    let latin = set.get(AlphabetName::Latin);
    // "z" is outside the 15-letter item slice even though it is a Latin letter.
    let err = latin.index_of("z").unwrap_err();
    match err {
        LsaError::Alphabet(info) => {
            assert_eq!(info.code, "alphabet.unknown-symbol");
            assert_eq!(info.context.get("symbol").map(String::as_str), Some("z"));
        }
        other => panic!("unexpected error family: {other}"),
    }
}

#[test]
fn shifted_wraps_with_floor_modulo_semantics() {
    let set = AlphabetSet::items_letterstring();
    let latin = set.get(AlphabetName::Latin);
    assert_eq!(latin.shifted("a", 1).unwrap(), "b");
    assert_eq!(latin.shifted("a", -1).unwrap(), "o");
    assert_eq!(latin.shifted("o", 1).unwrap(), "a");
    assert_eq!(latin.shifted("a", -16).unwrap(), "o");
    assert_eq!(latin.shifted("a", 15).unwrap(), "a");
}

#[test]
fn greek_uses_letter_names() {
    let set = AlphabetSet::items_letterstring();
    let greek = set.get(AlphabetName::Greek);
    assert_eq!(greek.len(), 24);
    assert_eq!(greek.shifted("alpha", -1).unwrap(), "omega");
    assert_eq!(greek.shifted("omega", 2).unwrap(), "beta");
}

#[test]
fn profiles_expose_the_expected_slices() {
    let items = AlphabetSet::items_letterstring();
    assert_eq!(items.get(AlphabetName::Latin).len(), 15);
    assert_eq!(items.get(AlphabetName::Symbol).len(), 12);

    let rulecheck = AlphabetSet::items_rulecheck();
    assert_eq!(rulecheck.get(AlphabetName::Latin).len(), 26);
    assert_eq!(rulecheck.get(AlphabetName::Symbol).len(), 15);

    let display = AlphabetSet::display_standard();
    assert!(display.get(AlphabetName::Latin).joined().starts_with("a b c"));
    assert_eq!(display.get(AlphabetName::Symbol).symbols()[0], "*");
}

#[test]
fn alphabet_names_parse_from_item_file_spelling() {
    assert_eq!(AlphabetName::from_str("Latin").unwrap(), AlphabetName::Latin);
    assert_eq!(AlphabetName::from_str("Greek").unwrap(), AlphabetName::Greek);
    assert_eq!(AlphabetName::from_str("Symbol").unwrap(), AlphabetName::Symbol);
    assert!(AlphabetName::from_str("latin").is_err());
}
