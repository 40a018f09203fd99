use crate::{
    context::Context,
    stage::{
        Stage, StageError, collapse_whitespace::is_collapsible, normalize_hamza::push_joined,
    },
    unicode::ZWNJ,
};
use std::borrow::Cow;

/// Replaces every zero-width non-joiner with a fixed string.
///
/// The default replacement is empty (the joiner is deleted); the full
/// pipeline uses a space so typographically joined words become separate
/// tokens.
///
/// Text on either side of a removed joiner is joined the way the earlier
/// stages would leave it: no doubled space or newline, and madda and weak
/// hamza rewritten at the seam (`خانه‌آباد` → `خانهاباد` when deleting).
#[derive(Debug, Clone, Default)]
pub struct ReplaceZwnj {
    pub replacement: String,
}

impl ReplaceZwnj {
    pub fn new(replacement: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
        }
    }

    /// Replace with a plain space.
    pub fn with_space() -> Self {
        Self::new(" ")
    }
}

impl Stage for ReplaceZwnj {
    fn name(&self) -> &'static str {
        "replace_zwnj"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        Ok(text.contains(ZWNJ) && self.replacement != "\u{200C}")
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text, ctx)? {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len());
        for (i, piece) in text.split(ZWNJ).enumerate() {
            if i > 0 {
                join(&mut out, &self.replacement);
            }
            join(&mut out, piece);
        }
        Ok(Cow::Owned(out))
    }
}

fn join(out: &mut String, piece: &str) {
    let piece = match piece.chars().next() {
        Some(c) if is_collapsible(c) && out.ends_with(c) => &piece[c.len_utf8()..],
        _ => piece,
    };
    push_joined(out, piece);
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for ReplaceZwnj {
    fn should_transform(_lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        &[
            ("می\u{200C}روم", "میروم"),
            ("\u{200C}\u{200C}", ""),
            ("خانه\u{200C}آباد", "خانهاباد"),
            ("ما\u{200C}ء خوب", "ما خوب"),
            ("سلام \u{200C} دنیا", "سلام دنیا"),
        ]
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(ReplaceZwnj::default());
    }

    #[test]
    fn space_replacement_contract_compliance() {
        use crate::testing::stage_contract::{
            handles_empty_string, needs_apply_is_accurate, no_panic_on_mixed_scripts,
            stage_is_idempotent,
        };
        let stage = ReplaceZwnj::with_space();
        stage_is_idempotent(&stage);
        needs_apply_is_accurate(&stage);
        handles_empty_string(&stage);
        no_panic_on_mixed_scripts(&stage);
    }
}
