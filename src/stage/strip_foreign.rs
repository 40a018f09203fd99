use crate::{
    context::Context,
    lang::LocaleBehavior,
    stage::{Stage, StageError, map_chars},
    unicode::{ARABIC_PUNCTUATION, TATWEEL, ZWNJ, is_arabic_indic_digit},
};
use std::borrow::Cow;

/// Keeps only the characters that belong to the active locale's script:
/// its alphabet, diacritics and digits, and whitespace. Arabic-script
/// locales also keep Arabic-Indic digits, the Arabic comma/semicolon/question
/// mark/full stop, tatweel and ZWNJ. Everything else (foreign letters, emoji,
/// symbols) is deleted.
///
/// Not part of the fixed pipeline.
pub struct StripForeign;

#[inline]
fn keep(c: char, ctx: &Context) -> bool {
    c.is_whitespace()
        || ctx.lang.is_alphabetic(c)
        || ctx.lang.is_diacritic(c)
        || ctx.lang.is_numeral(c)
        || (ctx.lang.uses_arabic_script() && is_arabic_mark(c))
}

#[inline]
fn is_arabic_mark(c: char) -> bool {
    c == ZWNJ || c == TATWEEL || ARABIC_PUNCTUATION.contains(&c) || is_arabic_indic_digit(c)
}

impl Stage for StripForeign {
    fn name(&self) -> &'static str {
        "strip_foreign"
    }

    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError> {
        Ok(text.chars().any(|c| !keep(c, ctx)))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        Ok(map_chars(text, |c| keep(c, ctx).then_some(c)))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for StripForeign {
    fn should_pass_through(lang: crate::lang::Lang) -> &'static [&'static str] {
        if lang == crate::lang::FAS {
            &["سلام دنیا ۱۲۳", "چرا؟", ""]
        } else {
            &["hello world 123", ""]
        }
    }

    fn should_transform(lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        if lang == crate::lang::FAS {
            &[
                ("سلام hello!", "سلام "),
                ("۱۲۳ 123 ١٢٣", "۱۲۳  ١٢٣"),
                ("خوب 👍", "خوب "),
            ]
        } else {
            &[
                ("hi سلام!", "hi "),
                ("a\u{200C}b ، \u{0663}\u{0640}", "ab  "),
            ]
        }
    }
}
