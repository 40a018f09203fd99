use crate::{
    context::Context,
    stage::{Stage, StageError},
};
use memchr::memchr2;
use std::borrow::Cow;

/// Characters whose runs are collapsed to a single occurrence.
const SPECIALS: [u8; 2] = [b'"', b'*'];

/// Collapses runs of two or more identical `"` or `*` characters into one.
///
/// Runs of *different* specials (`"*"`) are left alone.
pub struct CollapseSpecials;

#[inline(always)]
fn has_special(bytes: &[u8]) -> bool {
    memchr2(SPECIALS[0], SPECIALS[1], bytes).is_some()
}

#[inline(always)]
fn has_duplicate_run(bytes: &[u8]) -> bool {
    bytes
        .windows(2)
        .any(|w| w[0] == w[1] && SPECIALS.contains(&w[0]))
}

impl Stage for CollapseSpecials {
    fn name(&self) -> &'static str {
        "collapse_specials"
    }

    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        let bytes = text.as_bytes();
        Ok(has_special(bytes) && has_duplicate_run(bytes))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        let bytes = text.as_bytes();
        if !has_special(bytes) || !has_duplicate_run(bytes) {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len());
        let mut prev = None;
        for c in text.chars() {
            if prev == Some(c) && (c == '"' || c == '*') {
                continue;
            }
            out.push(c);
            prev = Some(c);
        }
        Ok(Cow::Owned(out))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for CollapseSpecials {
    fn should_pass_through(_lang: crate::lang::Lang) -> &'static [&'static str] {
        &["\"quoted\"", "*a*b*", "\"*\"*", ""]
    }

    fn should_transform(_lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        &[
            ("\"\"سلام\"\"", "\"سلام\""),
            ("****", "*"),
            ("a**b\"\"\"c", "a*b\"c"),
        ]
    }
}
