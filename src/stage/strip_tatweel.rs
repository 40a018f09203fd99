use crate::{
    context::Context,
    stage::{Stage, StageError, map_chars},
    unicode::TATWEEL,
};
use std::borrow::Cow;

/// Deletes every tatweel (kashida, U+0640) stretching character.
pub struct StripTatweel;

impl Stage for StripTatweel {
    fn name(&self) -> &'static str {
        "strip_tatweel"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        Ok(text.contains(TATWEEL))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        Ok(map_chars(text, |c| (c != TATWEEL).then_some(c)))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for StripTatweel {
    fn should_transform(_lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        &[("بـــزرگ", "بزرگ"), ("ـ", ""), ("سلامـ دنیا", "سلام دنیا")]
    }
}
