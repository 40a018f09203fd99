//! Core normalization stage abstraction.
//!
//! Every stage is a pure function from text to text. Stages receive a
//! `Cow<str>` and hand it back untouched (still borrowed, same pointer) when
//! there is nothing to change, so a pipeline over already-clean text never
//! allocates.

pub mod collapse_specials;
pub mod collapse_whitespace;
pub mod localize_digits;
pub mod localize_punctuation;
pub mod normalize_hamza;
pub mod remove_diacritics;
pub mod replace_zwnj;
pub mod segment_affixes;
pub mod strip_foreign;
pub mod strip_markup;
pub mod strip_tatweel;
pub mod strip_timestamp;
pub mod strip_url;
pub mod unify_arabic_letters;

use crate::context::Context;
use regex::Regex;
use std::borrow::Cow;
use thiserror::Error;

/// Public error type for every stage.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Normalization failed at stage `{0}`: {1}")]
    Failed(&'static str, String),
}

/// A single normalisation step.
pub trait Stage: Send + Sync {
    /// Human-readable name – used for tracing and error messages.
    fn name(&self) -> &'static str;

    /// Pre-check. Returning `Ok(false)` skips the whole stage; returning
    /// `Ok(true)` means `apply` will change the text.
    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError>;

    /// Allocation-aware transformation. Must always be correct, and must
    /// return `text` itself when nothing changes.
    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError>;
}

/// Run a per-character rewrite (`None` deletes the character), allocating
/// only once the first character actually changes.
pub(crate) fn map_chars<'a>(text: Cow<'a, str>, f: impl Fn(char) -> Option<char>) -> Cow<'a, str> {
    let first_change = text.char_indices().find(|&(_, c)| f(c) != Some(c));
    let Some((at, _)) = first_change else {
        return text;
    };
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..at]);
    out.extend(text[at..].chars().filter_map(f));
    Cow::Owned(out)
}

/// Replace every match of `re`, keeping `text` borrowed when nothing matched.
pub(crate) fn replace_all<'a>(re: &Regex, text: Cow<'a, str>, replacement: &str) -> Cow<'a, str> {
    match re.replace_all(&text, regex::NoExpand(replacement)) {
        Cow::Borrowed(_) => text,
        Cow::Owned(replaced) => Cow::Owned(replaced),
    }
}
