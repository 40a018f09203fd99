use crate::{
    context::Context,
    stage::{Stage, StageError},
    unicode::ZWNJ,
};
use std::borrow::Cow;

/// Collapses repeated separators, one rule per separator kind:
///
/// | run            | becomes  |
/// |----------------|----------|
/// | 2+ spaces      | 1 space  |
/// | 2+ `\n`        | 1 `\n`   |
/// | 2+ ZWNJ        | 1 ZWNJ   |
///
/// Mixed runs (`" \n "`) are not merged, and ZWNJ is never erased: it is a
/// joiner, not whitespace to be dropped.
pub struct CollapseWhitespace;

#[inline(always)]
pub(crate) fn is_collapsible(c: char) -> bool {
    matches!(c, ' ' | '\n' | ZWNJ)
}

fn has_run(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.windows(2).any(|w| w == b"  " || w == b"\n\n") {
        return true;
    }
    text.contains("\u{200C}\u{200C}")
}

impl Stage for CollapseWhitespace {
    fn name(&self) -> &'static str {
        "collapse_whitespace"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        Ok(has_run(text))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !has_run(&text) {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len());
        let mut prev = None;
        for c in text.chars() {
            if prev == Some(c) && is_collapsible(c) {
                continue;
            }
            out.push(c);
            prev = Some(c);
        }
        Ok(Cow::Owned(out))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for CollapseWhitespace {
    fn should_pass_through(_lang: crate::lang::Lang) -> &'static [&'static str] {
        &["a b\nc", " \n \n ", "\t\t", "خانه\u{200C}ها", ""]
    }

    fn should_transform(_lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        &[
            ("see this   now", "see this now"),
            ("a\n\n\nb", "a\nb"),
            ("می\u{200C}\u{200C}\u{200C}روم", "می\u{200C}روم"),
            ("  \n\n  ", " \n "),
        ]
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(CollapseWhitespace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zwnj_run_is_kept_as_single_joiner() {
        let out = CollapseWhitespace
            .apply(Cow::Borrowed("\u{200C}\u{200C}"), &Context::default())
            .unwrap();
        assert_eq!(out, "\u{200C}");
    }

    #[test]
    fn tabs_are_not_collapsed() {
        assert!(!CollapseWhitespace.needs_apply("a\t\tb", &Context::default()).unwrap());
    }
}
