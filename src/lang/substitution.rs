//! Position-aligned code-point substitution tables.
//!
//! For every target locale the tables map each character of every *other*
//! locale's set to the character at the same position in the target set.
//! They are built once, on first use, and shared read-only afterwards.

use crate::lang::{
    Lang,
    data::{ALL_LANGS, numeral_sets, punctuation_sets},
};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Code-point to code-point mapping for one target locale.
#[derive(Debug, Default)]
pub struct CharMap {
    map: HashMap<char, char>,
}

impl CharMap {
    fn aligned<'s>(target: &str, donors: impl Iterator<Item = &'s str>) -> Self {
        let mut map = HashMap::new();
        for donor in donors {
            for (from, to) in donor.chars().zip(target.chars()) {
                if from != to {
                    map.insert(from, to);
                }
            }
        }
        Self { map }
    }

    #[inline(always)]
    pub fn get(&self, c: char) -> Option<char> {
        self.map.get(&c).copied()
    }

    #[inline(always)]
    pub fn map_char(&self, c: char) -> char {
        self.get(c).unwrap_or(c)
    }

    #[inline]
    pub fn needs_mapping(&self, text: &str) -> bool {
        !self.map.is_empty() && text.chars().any(|c| self.map.contains_key(&c))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

type TableSet = HashMap<&'static str, CharMap>;

fn build<I>(sets: impl Fn() -> I) -> TableSet
where
    I: Iterator<Item = (&'static str, &'static str)>,
{
    ALL_LANGS
        .iter()
        .filter_map(|lang| {
            let (_, target) = sets().find(|(code, _)| *code == lang.code())?;
            let donors = sets()
                .filter(|(code, _)| *code != lang.code())
                .map(|(_, set)| set);
            Some((lang.code(), CharMap::aligned(target, donors)))
        })
        .collect()
}

static DIGIT_TABLES: LazyLock<TableSet> = LazyLock::new(|| build(numeral_sets));
static PUNCTUATION_TABLES: LazyLock<TableSet> = LazyLock::new(|| build(punctuation_sets));
static EMPTY: LazyLock<CharMap> = LazyLock::new(CharMap::default);

/// Digits of every other numeral set (donors included) → digits of `lang`.
pub fn digit_map(lang: Lang) -> &'static CharMap {
    DIGIT_TABLES.get(lang.code()).unwrap_or(&*EMPTY)
}

/// Punctuation of every other locale → punctuation of `lang`.
pub fn punctuation_map(lang: Lang) -> &'static CharMap {
    PUNCTUATION_TABLES.get(lang.code()).unwrap_or(&*EMPTY)
}
