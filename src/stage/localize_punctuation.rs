use crate::{
    context::Context,
    lang::LocaleBehavior,
    stage::{Stage, StageError, map_chars},
};
use std::borrow::Cow;

/// Longest run of punctuation treated as one unit when spacing.
const MAX_RUN: usize = 3;

/// Rewrites punctuation in the active locale's marks and, optionally, pads
/// it with a separator.
///
/// 1. Locale pre-step: decorative quotes are unified (`«` `»` → `"` in
///    Persian).
/// 2. Every mark of another locale becomes the mark at the same position in
///    the active set (`?` → `؟`, `,` → `،`, `;` → `؛`, `%` → `٪`).
/// 3. With a separator, every run of up to three active marks gets the
///    separator before and after it, unless that side already touches the
///    separator or the edge of the text:
///
/// ```text
/// سلام،خوبی؟   →   سلام ، خوبی ؟
/// ```
#[derive(Debug, Clone)]
pub struct LocalizePunctuation {
    pub separator: Option<String>,
}

impl Default for LocalizePunctuation {
    fn default() -> Self {
        Self {
            separator: Some(" ".to_owned()),
        }
    }
}

impl LocalizePunctuation {
    pub fn new(separator: Option<String>) -> Self {
        Self {
            separator: separator.filter(|s| !s.is_empty()),
        }
    }

    /// Substitution only, no spacing.
    pub fn unspaced() -> Self {
        Self { separator: None }
    }

    fn separator(&self) -> Option<&str> {
        self.separator.as_deref().filter(|s| !s.is_empty())
    }

    fn localize<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        let map = ctx.punctuation_map();
        let text = ctx.lang.unify_quotes(text);
        let text = map_chars(text, |c| Some(map.map_char(c)));
        match self.separator() {
            Some(sep) => match space_punctuation(&text, sep, ctx) {
                Some(spaced) => Cow::Owned(spaced),
                None => text,
            },
            None => text,
        }
    }
}

/// Pads runs of active punctuation with `sep`; `None` when nothing changes.
fn space_punctuation(text: &str, sep: &str, ctx: &Context) -> Option<String> {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut changed = false;
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if !ctx.lang.is_punctuation(c) {
            out.push(c);
            continue;
        }

        // one chunk: this mark plus up to MAX_RUN - 1 following marks
        let mut end = start + c.len_utf8();
        let mut taken = 1;
        while taken < MAX_RUN {
            match chars.peek() {
                Some(&(i, n)) if ctx.lang.is_punctuation(n) => {
                    end = i + n.len_utf8();
                    taken += 1;
                    chars.next();
                }
                _ => break,
            }
        }

        if !out.is_empty() && !out.ends_with(sep) {
            out.push_str(sep);
            changed = true;
        }
        out.push_str(&text[start..end]);
        if end < text.len() && !text[end..].starts_with(sep) {
            out.push_str(sep);
            changed = true;
        }
    }

    changed.then_some(out)
}

impl Stage for LocalizePunctuation {
    fn name(&self) -> &'static str {
        "localize_punctuation"
    }

    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError> {
        Ok(matches!(self.localize(Cow::Borrowed(text), ctx), Cow::Owned(_)))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        Ok(self.localize(text, ctx))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for LocalizePunctuation {
    fn should_pass_through(lang: crate::lang::Lang) -> &'static [&'static str] {
        if lang == crate::lang::FAS {
            &["سلام ، خوبی ؟", "؟ ! .", "بدون علامت", ""]
        } else {
            &["hello , world ?", "plain", ""]
        }
    }

    fn should_transform(lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        if lang == crate::lang::FAS {
            &[
                ("سلام،خوبی؟", "سلام ، خوبی ؟"),
                ("why?", "why ؟"),
                ("«کتاب»", "\" کتاب \""),
                ("واقعا؟!...", "واقعا ؟!. .."),
                ("۵۰%", "۵۰ ٪"),
            ]
        } else {
            &[("سلام،خوبی؟", "سلام , خوبی ?"), ("a;b", "a ; b")]
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{ENG, FAS};

    fn localize(stage: &LocalizePunctuation, text: &str) -> String {
        stage
            .apply(Cow::Borrowed(text), &Context::new(FAS))
            .unwrap()
            .into_owned()
    }

    #[test]
    fn substitution_without_separator() {
        let stage = LocalizePunctuation::unspaced();
        assert_eq!(localize(&stage, "a,b;c?d%"), "a،b؛c؟d٪");
    }

    #[test]
    fn empty_separator_means_no_spacing() {
        let stage = LocalizePunctuation::new(Some(String::new()));
        assert_eq!(localize(&stage, "سلام،خوبی"), "سلام،خوبی");
    }

    #[test]
    fn existing_spacing_is_not_doubled() {
        let stage = LocalizePunctuation::default();
        assert_eq!(localize(&stage, "سلام ،خوبی"), "سلام ، خوبی");
        assert_eq!(localize(&stage, "سلام، خوبی"), "سلام ، خوبی");
    }

    #[test]
    fn long_runs_are_split_into_chunks_of_three() {
        let stage = LocalizePunctuation::default();
        assert_eq!(localize(&stage, "نه!!!!!"), "نه !!! !!");
    }

    #[test]
    fn edges_of_text_get_no_separator() {
        let stage = LocalizePunctuation::default();
        assert_eq!(localize(&stage, "؟سلام."), "؟ سلام .");
    }

    #[test]
    fn custom_separator() {
        let stage = LocalizePunctuation::new(Some("_".into()));
        assert_eq!(localize(&stage, "الف،ب"), "الف_،_ب");
    }

    #[test]
    fn english_target_maps_persian_marks_back() {
        let out = LocalizePunctuation::unspaced()
            .apply(Cow::Borrowed("چرا؟ بله، ۵٪"), &Context::new(ENG))
            .unwrap();
        assert_eq!(out, "چرا? بله, ۵%");
    }
}
