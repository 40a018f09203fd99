use crate::lang::{CharRange, Lang, LangEntry};

use paste::paste;
use phf::{Map, phf_map};

/// Every numeral set holds the ten decimal digits in value order.
pub const DIGIT_COUNT: usize = 10;

/// Reference punctuation set: every locale's set must have the same length.
const PUNCTUATION_REFERENCE: &str = fas_data::PUNCTUATION;

/// Number of Unicode scalar values in `s`, usable in const assertions.
pub const fn char_count(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut n = 0;
    while i < bytes.len() {
        if bytes[i] & 0xC0 != 0x80 {
            n += 1;
        }
        i += 1;
    }
    n
}

/// ---------------------------------------------------------------------------
///    Macro – generates everything from a single table
/// ---------------------------------------------------------------------------
macro_rules! define_languages {
    ($(
        $code:ident, $code_str:literal, $name:literal,
        punctuation: $punct:literal,
        numerals: $digits:literal,
        alphabet: [ $($alpha:expr),* $(,)? ],
        diacritics: [ $($diac:expr),* $(,)? ],
        quote_folds: [ $($qfrom:literal => $qto:literal),* $(,)? ],
        affixes: $affixes:expr
    ),* $(,)?) => {
        // Public `Lang` constants
        $(
            pub const $code: Lang = Lang { code: $code_str, name: $name };
        )*

        // Per-language static data modules
        $(
            paste! {
                mod [<$code:lower _data>] {
                    use super::*;

                    pub const PUNCTUATION: &str = $punct;
                    pub const NUMERALS: &str = $digits;
                    pub const ALPHABET: &[CharRange] = &[$($alpha),*];
                    pub const DIACRITICS: &[CharRange] = &[$($diac),*];
                    pub const QUOTE_FOLDS: &[(char, char)] = &[$(($qfrom, $qto)),*];

                    // Substitution tables map position-to-position; a length
                    // mismatch must fail the build, not corrupt output.
                    const _: () = assert!(
                        char_count(NUMERALS) == DIGIT_COUNT,
                        concat!("numeral set of `", $code_str, "` must hold exactly ten digits")
                    );
                    const _: () = assert!(
                        char_count(PUNCTUATION) == char_count(PUNCTUATION_REFERENCE),
                        concat!("punctuation set of `", $code_str, "` is not aligned with the reference set")
                    );
                }
            }
        )*

        // Global lookup table (public)
        paste! {
            pub static LANG_TABLE: Map<&'static str, LangEntry> = phf_map! {
                $(
                    $code_str => LangEntry {
                        punctuation: [<$code:lower _data>]::PUNCTUATION,
                        numerals: [<$code:lower _data>]::NUMERALS,
                        alphabet: [<$code:lower _data>]::ALPHABET,
                        diacritics: [<$code:lower _data>]::DIACRITICS,
                        quote_folds: [<$code:lower _data>]::QUOTE_FOLDS,
                        affixes: $affixes,
                    }
                ),*
            };
        }

        pub static ALL_LANGS: &[Lang] = &[$($code),*];

        /// Case-insensitive lookup of a supported locale code.
        pub fn from_code(code: &str) -> Option<Lang> {
            let lower = code.to_ascii_lowercase();
            match lower.as_str() {
                $(
                    $code_str => Some($code),
                )*
                _ => None,
            }
        }
    };
}

// ---------------------------------------------------------------------------
//    Language definitions (single source of truth)
//    Punctuation and numerals are position-aligned across every entry.
// ---------------------------------------------------------------------------
define_languages! {
    FAS, "fa", "Persian",
        punctuation: "\"/؟!٪()،؛:.",
        numerals: "۰۱۲۳۴۵۶۷۸۹",
        alphabet: [
            '\u{0621}'..='\u{063A}',
            '\u{0641}'..='\u{064A}',
            'پ'..='پ', 'چ'..='چ', 'ژ'..='ژ', 'ک'..='ک', 'گ'..='گ', 'ی'..='ی',
            '\u{0654}'..='\u{0654}',
        ],
        diacritics: [ '\u{0610}'..='\u{061A}', '\u{064B}'..='\u{065F}' ],
        quote_folds: [ '«' => '"', '»' => '"' ],
        affixes: Some(&crate::affix::PERSIAN_AFFIXES),

    ENG, "en", "English",
        punctuation: "\"/?!%(),;:.",
        numerals: "0123456789",
        alphabet: [ 'a'..='z', 'A'..='Z' ],
        diacritics: [],
        quote_folds: [],
        affixes: None,
}

/// Digit sets that only ever act as substitution *sources*: Arabic-Indic
/// digits are unified onto the active locale but `ar` is never a locale.
pub static DIGIT_DONORS: Map<&'static str, &'static str> = phf_map! {
    "ar" => ARABIC_INDIC_DIGITS,
};

const ARABIC_INDIC_DIGITS: &str = "٠١٢٣٤٥٦٧٨٩";
const _: () = assert!(char_count(ARABIC_INDIC_DIGITS) == DIGIT_COUNT);

#[inline]
pub fn all_langs() -> &'static [Lang] {
    ALL_LANGS
}

/// Every numeral set of the class table, donors included, keyed by code.
pub fn numeral_sets() -> impl Iterator<Item = (&'static str, &'static str)> {
    LANG_TABLE
        .entries()
        .map(|(code, e)| (*code, e.numerals))
        .chain(DIGIT_DONORS.entries().map(|(code, set)| (*code, *set)))
}

/// Every punctuation set of the class table, keyed by code.
pub fn punctuation_sets() -> impl Iterator<Item = (&'static str, &'static str)> {
    LANG_TABLE.entries().map(|(code, e)| (*code, e.punctuation))
}
