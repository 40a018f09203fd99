//! src/stage/remove_diacritics.rs
//!
//! Removes the active locale's diacritics (harakat, Quranic marks).

use crate::{
    context::Context,
    lang::LocaleBehavior,
    stage::{Stage, StageError, map_chars},
};
use std::borrow::Cow;

/// Deletes every code point inside the active locale's diacritic ranges.
///
/// The ranges are contiguous Unicode blocks (for Persian U+0610–U+061A and
/// U+064B–U+065F), so fatha, kasra, damma, tanwin, shadda and sukun all go,
/// and nothing outside the ranges is touched. No decomposition is performed.
///
/// Locales without diacritics (English) pass every text through unchanged.
pub struct RemoveDiacritics;

impl Stage for RemoveDiacritics {
    fn name(&self) -> &'static str {
        "remove_diacritics"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError> {
        Ok(ctx.lang.contains_diacritics(text))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !ctx.lang.has_diacritics() || text.is_ascii() {
            return Ok(text);
        }
        Ok(map_chars(text, |c| (!ctx.lang.is_diacritic(c)).then_some(c)))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for RemoveDiacritics {
    fn should_pass_through(_lang: crate::lang::Lang) -> &'static [&'static str] {
        &["کتاب", "hello", "آب", ""]
    }

    fn should_transform(lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        if lang == crate::lang::FAS {
            &[
                ("كِتَابٌ", "كتاب"),
                ("مُحَمَّد", "محمد"),
                ("\u{0610}ص", "ص"),
            ]
        } else {
            &[("كِتَابٌ", "كِتَابٌ")]
        }
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(RemoveDiacritics);
    }
}
