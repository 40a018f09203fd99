//! Code points and character predicates shared by the stages.

pub const ZWNJ: char = '\u{200C}';
pub const TATWEEL: char = '\u{0640}';

pub const HAMZA: char = 'ء';
pub const ALEF: char = 'ا';
pub const ALEF_MADDA: char = 'آ';

/// Letters after which a trailing standalone hamza is dropped.
pub const HAMZA_CARRIERS: [char; 4] = ['ا', 'آ', 'و', 'ی'];

/// Hamza-carrying letters and their plain base letters.
pub const HAMZA_SEATS: [(char, char); 4] = [('إ', 'ا'), ('أ', 'ا'), ('ئ', 'ی'), ('ؤ', 'و')];

/// Arabic letter forms and their Persian counterparts.
pub const ARABIC_TO_PERSIAN: [(char, char); 3] = [('ي', 'ی'), ('ك', 'ک'), ('ة', 'ه')];

/// Arabic comma, semicolon, question mark and full stop.
pub const ARABIC_PUNCTUATION: [char; 4] = ['\u{060C}', '\u{061B}', '\u{061F}', '\u{06D4}'];

/// Regex class equivalent of [`is_word_char`].
pub const WORD_CLASS: &str = r"[\p{Alphabetic}\p{N}_]";
/// Regex class equivalent of `!is_word_char`.
pub const NON_WORD_CLASS: &str = r"[^\p{Alphabetic}\p{N}_]";

/// Word characters for affix boundaries: letters, numbers and `_`.
/// ZWNJ, whitespace and punctuation are boundaries.
#[inline(always)]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[inline(always)]
pub fn is_arabic_indic_digit(c: char) -> bool {
    matches!(c, '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}')
}

#[inline]
pub(crate) fn lookup(table: &[(char, char)], c: char) -> Option<char> {
    table.iter().find(|(from, _)| *from == c).map(|(_, to)| *to)
}
