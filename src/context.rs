// src/context.rs
// The single source of truth for locale configuration in hot paths.
// Tiny, Copy, and contains only 'static data.

use crate::lang::{
    CharRange, DEFAULT_LANG, Lang, LangEntry, LocaleBehavior,
    substitution::{CharMap, digit_map, punctuation_map},
};

/// Runtime context passed to every normalization stage.
///
/// Contains:
/// - `lang`: the resolved locale
/// - `lang_entry`: its character classes
/// - the cached substitution tables targeting that locale
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub lang: Lang,
    pub lang_entry: LangEntry,
    digits: &'static CharMap,
    punctuation: &'static CharMap,
}

impl Default for Context {
    #[inline(always)]
    fn default() -> Self {
        Self::new(DEFAULT_LANG)
    }
}

impl Context {
    /// Create a context using the canonical static data for a language.
    #[inline(always)]
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            lang_entry: *lang.entry(),
            digits: digit_map(lang),
            punctuation: punctuation_map(lang),
        }
    }

    /// Create a context from a locale code, falling back to the default
    /// locale when the code is not supported.
    pub fn resolve(code: &str) -> Self {
        Self::new(Lang::resolve(code))
    }

    #[inline(always)]
    pub fn punctuation(&self) -> &'static str {
        self.lang_entry.punctuation
    }

    #[inline(always)]
    pub fn numerals(&self) -> &'static str {
        self.lang_entry.numerals
    }

    #[inline(always)]
    pub fn alphabet(&self) -> &'static [CharRange] {
        self.lang_entry.alphabet
    }

    #[inline(always)]
    pub fn diacritics(&self) -> &'static [CharRange] {
        self.lang_entry.diacritics
    }

    #[inline(always)]
    pub fn digit_map(&self) -> &'static CharMap {
        self.digits
    }

    #[inline(always)]
    pub fn punctuation_map(&self) -> &'static CharMap {
        self.punctuation
    }
}
