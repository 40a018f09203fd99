use crate::{
    context::Context,
    stage::{Stage, StageError, map_chars},
    unicode::{ARABIC_TO_PERSIAN, lookup},
};
use std::borrow::Cow;

/// Replaces Arabic letter forms with their Persian counterparts:
/// `ي → ی`, `ك → ک`, `ة → ه`.
///
/// This is script unification, not localization: it runs the same way for
/// every locale.
pub struct UnifyArabicLetters;

impl Stage for UnifyArabicLetters {
    fn name(&self) -> &'static str {
        "unify_arabic_letters"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        if text.is_ascii() {
            return Ok(false);
        }
        Ok(text.chars().any(|c| lookup(&ARABIC_TO_PERSIAN, c).is_some()))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if text.is_ascii() {
            return Ok(text);
        }
        Ok(map_chars(text, |c| Some(lookup(&ARABIC_TO_PERSIAN, c).unwrap_or(c))))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for UnifyArabicLetters {
    fn should_pass_through(_lang: crate::lang::Lang) -> &'static [&'static str] {
        &["کتاب یک", "abc", ""]
    }

    fn should_transform(_lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        &[
            ("كتاب", "کتاب"),
            ("علي", "علی"),
            ("مدرسة", "مدرسه"),
            ("كيك", "کیک"),
        ]
    }
}
