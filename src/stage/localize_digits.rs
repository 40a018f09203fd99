use crate::{
    context::Context,
    stage::{Stage, StageError, map_chars},
};
use std::borrow::Cow;

/// Rewrites every digit of every other numeral set (Latin, Persian,
/// Arabic-Indic) as the active locale's digit of the same value.
///
/// | input | `fa` | `en` |
/// |-------|------|------|
/// | `3`   | `۳`  | `3`  |
/// | `٣`   | `۳`  | `3`  |
/// | `۳`   | `۳`  | `3`  |
pub struct LocalizeDigits;

impl Stage for LocalizeDigits {
    fn name(&self) -> &'static str {
        "localize_digits"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError> {
        Ok(ctx.digit_map().needs_mapping(text))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        let map = ctx.digit_map();
        Ok(map_chars(text, |c| Some(map.map_char(c))))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for LocalizeDigits {
    fn should_pass_through(lang: crate::lang::Lang) -> &'static [&'static str] {
        if lang == crate::lang::FAS {
            &["۰۱۲۳۴۵۶۷۸۹", "سلام", ""]
        } else {
            &["0123456789", "abc", ""]
        }
    }

    fn should_transform(lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        if lang == crate::lang::FAS {
            &[
                ("0123456789", "۰۱۲۳۴۵۶۷۸۹"),
                ("٠١٢٣٤٥٦٧٨٩", "۰۱۲۳۴۵۶۷۸۹"),
                ("سال 1402 و ١٤٠٢", "سال ۱۴۰۲ و ۱۴۰۲"),
            ]
        } else {
            &[
                ("۰۱۲۳۴۵۶۷۸۹", "0123456789"),
                ("٠١٢٣٤٥٦٧٨٩", "0123456789"),
            ]
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::FAS;

    #[test]
    fn value_is_preserved_for_every_digit() {
        let ctx = Context::new(FAS);
        for value in 0..10u32 {
            let latin = char::from_digit(value, 10).unwrap();
            let arabic = char::from_u32(0x0660 + value).unwrap();
            let persian = char::from_u32(0x06F0 + value).unwrap();
            for donor in [latin, arabic] {
                let out = LocalizeDigits
                    .apply(Cow::Owned(donor.to_string()), &ctx)
                    .unwrap();
                assert_eq!(out, persian.to_string());
            }
        }
    }
}
