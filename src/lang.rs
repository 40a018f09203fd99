pub(crate) mod behaviour;
pub mod data;
pub mod substitution;

use std::ops::RangeInclusive;

pub use behaviour::LocaleBehavior;
pub use data::{ALL_LANGS, ENG, FAS, LANG_TABLE, all_langs, from_code};

use crate::affix::AffixCatalog;

/// A supported locale. Only constructible through the constants generated in
/// [`data`], so every `Lang` is guaranteed to have a [`LangEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lang {
    pub(crate) code: &'static str,
    pub(crate) name: &'static str,
}

impl Lang {
    #[inline(always)]
    pub const fn code(&self) -> &'static str {
        self.code
    }
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Resolve a requested locale code against the supported set.
    ///
    /// Unsupported or empty codes are not an error: they fall back to
    /// [`DEFAULT_LANG`].
    pub fn resolve(requested: &str) -> Lang {
        match from_code(requested.trim()) {
            Some(lang) => lang,
            None => {
                tracing::debug!(
                    requested,
                    fallback = DEFAULT_LANG.code,
                    "unsupported locale, falling back to default"
                );
                DEFAULT_LANG
            }
        }
    }
}

impl Default for Lang {
    fn default() -> Self {
        DEFAULT_LANG
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

pub const DEFAULT_LANG: Lang = FAS;

/// Contiguous code-point block, e.g. the Arabic harakat.
pub type CharRange = RangeInclusive<char>;

/// Character classes of one locale.
///
/// `punctuation` and `numerals` are *position-aligned* across locales: the
/// Nth mark of one locale is the counterpart of the Nth mark of every other
/// locale. Substitution tables are built position-to-position from them.
#[derive(Clone, Copy, Debug)]
pub struct LangEntry {
    pub punctuation: &'static str,
    pub numerals: &'static str,
    pub alphabet: &'static [CharRange],
    pub diacritics: &'static [CharRange],
    /// Decorative glyphs folded onto a plain mark before punctuation
    /// substitution (e.g. guillemets in Persian).
    pub quote_folds: &'static [(char, char)],
    pub affixes: Option<&'static AffixCatalog>,
}

impl LangEntry {
    #[inline]
    pub fn has_diacritics(&self) -> bool {
        !self.diacritics.is_empty()
    }

    #[inline]
    pub fn has_affixes(&self) -> bool {
        self.affixes.is_some()
    }
}

#[inline]
pub(crate) fn in_ranges(ranges: &[CharRange], c: char) -> bool {
    ranges.iter().any(|r| r.contains(&c))
}
