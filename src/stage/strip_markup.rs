use crate::{
    context::Context,
    stage::{Stage, StageError, replace_all},
};
use memchr::memchr;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Generic angle-bracket tag, matched non-greedily on a single line.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("valid tag pattern"));

/// Fast pre-scan: if no '<' appears, text is guaranteed to have no tags
#[inline(always)]
fn contains_tag_open(text: &str) -> bool {
    memchr(b'<', text.as_bytes()).is_some()
}

/// Deletes HTML/XML markup tags while keeping the text between them.
///
/// This is not a parser: anything shaped like `<…>` on one line is removed,
/// an unterminated `<` is left in place. Input is expected to be plain text
/// with incidental markup.
pub struct StripMarkup;

impl Stage for StripMarkup {
    fn name(&self) -> &'static str {
        "strip_markup"
    }

    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        Ok(contains_tag_open(text) && TAG.is_match(text))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !contains_tag_open(&text) {
            return Ok(text);
        }
        Ok(replace_all(&TAG, text, ""))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for StripMarkup {
    fn should_pass_through(_lang: crate::lang::Lang) -> &'static [&'static str] {
        &["سلام", "a > b", "x < y", ""]
    }

    fn should_transform(_lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        &[
            ("<b>سلام</b>", "سلام"),
            ("<p class=\"x\">متن</p>\n<br/>", "متن\n"),
            ("a <> b", "a  b"),
        ]
    }
}
