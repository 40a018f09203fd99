use crate::{
    lang::{Lang, LangEntry, data::LANG_TABLE, in_ranges},
    unicode::ALEF,
};
use std::borrow::Cow;

/// ---------------------------------------------------------------------------
/// LocaleBehavior – the locale-sensitive operations, driven by `LangEntry`
/// ---------------------------------------------------------------------------
pub trait LocaleBehavior {
    fn entry(&self) -> &'static LangEntry;

    #[inline(always)]
    fn is_punctuation(&self, c: char) -> bool {
        self.entry().punctuation.contains(c)
    }

    #[inline(always)]
    fn is_numeral(&self, c: char) -> bool {
        self.entry().numerals.contains(c)
    }

    #[inline(always)]
    fn is_alphabetic(&self, c: char) -> bool {
        in_ranges(self.entry().alphabet, c)
    }

    /// Whether the locale is written in Arabic script.
    #[inline]
    fn uses_arabic_script(&self) -> bool {
        self.is_alphabetic(ALEF)
    }

    // -------------------------------------------------------------------------
    // Diacritic helpers
    // -------------------------------------------------------------------------
    #[inline(always)]
    fn has_diacritics(&self) -> bool {
        self.entry().has_diacritics()
    }

    #[inline(always)]
    fn is_diacritic(&self, c: char) -> bool {
        in_ranges(self.entry().diacritics, c)
    }

    #[inline]
    fn contains_diacritics(&self, text: &str) -> bool {
        self.has_diacritics() && !text.is_ascii() && text.chars().any(|c| self.is_diacritic(c))
    }

    // -------------------------------------------------------------------------
    // Quote unification (locale pre-step of punctuation localization)
    // -------------------------------------------------------------------------
    #[inline(always)]
    fn fold_quote(&self, c: char) -> char {
        self.entry()
            .quote_folds
            .iter()
            .find(|(from, _)| *from == c)
            .map_or(c, |(_, to)| *to)
    }

    fn unify_quotes<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        let folds = self.entry().quote_folds;
        if folds.is_empty() || !text.chars().any(|c| folds.iter().any(|(f, _)| *f == c)) {
            return text;
        }
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            let folded = self.fold_quote(c);
            // folding never leaves a run of identical quotes
            if out.ends_with(folded) && folds.iter().any(|(_, to)| *to == folded) {
                continue;
            }
            out.push(folded);
        }
        Cow::Owned(out)
    }
}

impl LocaleBehavior for Lang {
    #[inline(always)]
    fn entry(&self) -> &'static LangEntry {
        LANG_TABLE
            .get(self.code())
            .expect("language not present in LANG_TABLE – this is a bug")
    }
}
