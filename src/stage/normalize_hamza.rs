use crate::{
    context::Context,
    stage::{Stage, StageError},
    unicode::{ALEF, ALEF_MADDA, HAMZA, HAMZA_CARRIERS, HAMZA_SEATS, ZWNJ, is_word_char, lookup},
};
use std::borrow::Cow;

/// Positional hamza and madda cleanup.
///
/// 1. A standalone hamza `ء` after one of `ا آ و ی` that ends a word is
///    dropped (`ماء ` → `ما `). The word ends at whitespace, ZWNJ or
///    punctuation, but not at the end of the text. Seat letters count as
///    their base letter here (`ئء ` → `ی `).
/// 2. `آ` becomes `ا` unless it starts a word: the start of the text, or a
///    position right after whitespace or ZWNJ (`قرآن` → `قران`, `آب` and
///    `خانه‌آباد` are kept).
/// 3. Hamza seats collapse to their base letter: `إ أ → ا`, `ئ → ی`, `ؤ → و`.
///
/// All three rules look at the *input* neighbours of each character, so they
/// can be evaluated in a single pass.
pub struct NormalizeHamza;

#[inline(always)]
fn is_candidate(c: char) -> bool {
    c == HAMZA || c == ALEF_MADDA || lookup(&HAMZA_SEATS, c).is_some()
}

/// A hamza between `prev` and `next` that rule 1 drops.
#[inline]
fn is_weak_hamza(prev: Option<char>, next: Option<char>) -> bool {
    prev.is_some_and(|p| HAMZA_CARRIERS.contains(&lookup(&HAMZA_SEATS, p).unwrap_or(p)))
        && next.is_some_and(|n| !is_word_char(n))
}

/// The replacement for `c` given its neighbours; `None` drops it.
#[inline]
fn rewrite(prev: Option<char>, c: char, next: Option<char>) -> Option<char> {
    match c {
        HAMZA if is_weak_hamza(prev, next) => None,
        ALEF_MADDA if prev.is_some_and(|p| !p.is_whitespace() && p != ZWNJ) => Some(ALEF),
        c => Some(lookup(&HAMZA_SEATS, c).unwrap_or(c)),
    }
}

/// Appends `piece` to `out` with the positional rules applied across the
/// seam, so text joined after this stage has run needs no second pass.
pub(crate) fn push_joined(out: &mut String, piece: &str) {
    let mut chars = piece.chars();
    let Some(first) = chars.next() else {
        return;
    };
    let trailing_weak = {
        let mut tail = out.chars().rev();
        tail.next() == Some(HAMZA) && is_weak_hamza(tail.next(), Some(first))
    };
    if trailing_weak {
        out.pop();
    }
    if matches!(first, HAMZA | ALEF_MADDA) {
        let prev = out.chars().next_back();
        if let Some(c) = rewrite(prev, first, chars.clone().next()) {
            out.push(c);
        }
    } else {
        out.push(first);
    }
    out.push_str(chars.as_str());
}

/// Byte offset of the first character that `rewrite` changes.
fn first_change(text: &str) -> Option<usize> {
    let mut prev = None;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if is_candidate(c) {
            let next = chars.peek().map(|&(_, n)| n);
            if rewrite(prev, c, next) != Some(c) {
                return Some(i);
            }
        }
        prev = Some(c);
    }
    None
}

impl Stage for NormalizeHamza {
    fn name(&self) -> &'static str {
        "normalize_hamza"
    }

    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        if text.is_ascii() {
            return Ok(false);
        }
        Ok(first_change(text).is_some())
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        let Some(start) = first_change(&text) else {
            return Ok(text);
        };
        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..start]);

        let mut prev = text[..start].chars().next_back();
        let mut chars = text[start..].chars().peekable();
        while let Some(c) = chars.next() {
            if let Some(r) = rewrite(prev, c, chars.peek().copied()) {
                out.push(r);
            }
            prev = Some(c);
        }
        Ok(Cow::Owned(out))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for NormalizeHamza {
    fn should_pass_through(_lang: crate::lang::Lang) -> &'static [&'static str] {
        &["آب", "خانه\u{200C}آباد", "سلام آقا", "ماء", "abc", ""]
    }

    fn should_transform(_lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        &[
            ("قرآن", "قران"),
            ("ماء زلال", "ما زلال"),
            ("شیء گران", "شی گران"),
            ("إسلام", "اسلام"),
            ("مسئله", "مسیله"),
            ("مؤمن", "مومن"),
            ("أحمد", "احمد"),
        ]
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(NormalizeHamza);
    }
}
