use crate::{
    affix::{
        AffixClass, AffixPosition, AffixRule, CircumfixMatch, CompiledCatalog, PrefixMatch,
        compiled_for,
    },
    context::Context,
    stage::{
        Stage, StageError,
        normalize_hamza::push_joined,
    },
    unicode::is_word_char,
};
use std::borrow::Cow;
use std::slice;

/// Bound on re-runs; separators that rewrite each other's gaps could
/// otherwise alternate forever.
const MAX_ROUNDS: usize = 8;

/// How the patterns of one affix class compete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AffixStrategy {
    /// One pass per pattern, in catalog order. Each pass sees the output of
    /// the previous one.
    #[default]
    CatalogOrder,
    /// One pass per class. At every position the longest matching affix
    /// wins; equal lengths go to the earlier pattern.
    LongestMatch,
}

/// Which affix positions are segmented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AffixSelection {
    #[default]
    All,
    Prefixes,
    Suffixes,
    Circumfixes,
}

impl AffixSelection {
    fn includes(self, position: AffixPosition) -> bool {
        match self {
            AffixSelection::All => true,
            AffixSelection::Prefixes => position == AffixPosition::Prefix,
            AffixSelection::Suffixes => position == AffixPosition::Suffix,
            AffixSelection::Circumfixes => position == AffixPosition::Circumfix,
        }
    }
}

/// Detaches prefixes and suffixes from their stems and closes circumfixed
/// compounds, using the active locale's affix catalog.
///
/// * prefix: `نمی رود` → `نمی{prefix_separator}رود`
/// * suffix: `کتاب ها` → `کتاب{suffix_separator}ها`
/// * circumfix: `هم کاری` → `همکاری`
///
/// The gap between affix and stem (any run of non-word characters,
/// including ZWNJ) is replaced by the separator. A madda that no longer
/// starts a word after the join is simplified (`نمی آید` → `نمیاید`), and a
/// weak hamza that the join leaves at a word end is dropped. Locales without
/// a catalog pass through.
#[derive(Debug, Clone, Default)]
pub struct SegmentAffixes {
    pub prefix_separator: String,
    pub suffix_separator: String,
    pub strategy: AffixStrategy,
    pub selection: AffixSelection,
}

impl SegmentAffixes {
    pub fn new(prefix_separator: impl Into<String>, suffix_separator: impl Into<String>) -> Self {
        Self {
            prefix_separator: prefix_separator.into(),
            suffix_separator: suffix_separator.into(),
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: AffixStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_selection(mut self, selection: AffixSelection) -> Self {
        self.selection = selection;
        self
    }

    fn catalog(&self, ctx: &Context) -> Result<Option<&'static CompiledCatalog>, StageError> {
        compiled_for(ctx.lang).map_err(|e| StageError::Failed(self.name(), e.to_string()))
    }

    /// The segmented text, `None` when no rule fired.
    ///
    /// The class sequence is re-run until the text stops changing, since
    /// a join can open a match for a class that already ran.
    fn segment(&self, text: &str, ctx: &Context) -> Result<Option<String>, StageError> {
        let Some(catalog) = self.catalog(ctx)? else {
            return Ok(None);
        };
        if text.is_empty() || text.is_ascii() {
            return Ok(None);
        }

        let mut current: Option<String> = None;
        for _ in 0..MAX_ROUNDS {
            let input = current.as_deref().unwrap_or(text);
            let Some(out) = self.round(catalog, input) else {
                break;
            };
            if out == input {
                break;
            }
            current = Some(out);
        }
        Ok(current)
    }

    /// Every selected class once, in processing order.
    fn round(&self, catalog: &CompiledCatalog, text: &str) -> Option<String> {
        let mut current: Option<String> = None;
        for class in AffixClass::ORDER {
            let position = class.position();
            if !self.selection.includes(position) {
                continue;
            }
            let rules = catalog.rules(class);
            match self.strategy {
                AffixStrategy::CatalogOrder => {
                    for rule in rules {
                        let input = current.as_deref().unwrap_or(text);
                        if let Some(out) = self.pass(position, slice::from_ref(rule), input) {
                            current = Some(out);
                        }
                    }
                }
                AffixStrategy::LongestMatch => {
                    let input = current.as_deref().unwrap_or(text);
                    if let Some(out) = self.pass(position, rules, input) {
                        current = Some(out);
                    }
                }
            }
        }
        current
    }

    fn pass(&self, position: AffixPosition, rules: &[AffixRule], text: &str) -> Option<String> {
        match position {
            AffixPosition::Prefix => prefix_pass(rules, text, &self.prefix_separator),
            AffixPosition::Suffix => suffix_pass(rules, text, &self.suffix_separator),
            AffixPosition::Circumfix => circumfix_pass(rules, text),
        }
    }
}

/// True when `i` is the start of the text or follows a non-word character.
#[inline]
fn at_word_start(text: &str, i: usize) -> bool {
    text[..i].chars().next_back().is_none_or(|c| !is_word_char(c))
}

#[inline]
fn char_len_at(text: &str, i: usize) -> usize {
    text[i..].chars().next().map_or(1, char::len_utf8)
}

/// `prefix + gap` at a word start becomes `prefix + sep`.
fn prefix_pass(rules: &[AffixRule], text: &str, sep: &str) -> Option<String> {
    let mut out = String::new();
    let mut copied = 0;
    let mut changed = false;
    let mut i = 0;

    while i < text.len() {
        if at_word_start(text, i) {
            let best = rules
                .iter()
                .filter_map(|r| r.match_prefix(&text[i..]))
                .fold(None, |best: Option<PrefixMatch>, m| match best {
                    Some(b) if b.affix >= m.affix => Some(b),
                    _ => Some(m),
                });
            if let Some(m) = best {
                let gap_start = i + m.affix;
                let gap_end = gap_start + m.gap;
                if &text[gap_start..gap_end] != sep {
                    push_joined(&mut out, &text[copied..gap_start]);
                    push_joined(&mut out, sep);
                    copied = gap_end;
                    changed = true;
                }
                i = gap_end;
                continue;
            }
        }
        i += char_len_at(text, i);
    }

    changed.then(|| {
        push_joined(&mut out, &text[copied..]);
        out
    })
}

/// `gap + suffix` followed by a boundary becomes `sep + suffix`.
fn suffix_pass(rules: &[AffixRule], text: &str, sep: &str) -> Option<String> {
    let mut out = String::new();
    let mut copied = 0;
    let mut changed = false;
    let mut i = 0;

    while i < text.len() {
        let Some(c) = text[i..].chars().next() else {
            break;
        };
        if is_word_char(c) {
            i += c.len_utf8();
            continue;
        }
        // maximal non-word run starting at `i`
        let gap_end = text[i..]
            .char_indices()
            .find(|&(_, c)| is_word_char(c))
            .map_or(text.len(), |(off, _)| i + off);
        if gap_end == text.len() {
            break;
        }
        let best = rules
            .iter()
            .filter_map(|r| r.match_suffix(&text[gap_end..]))
            .fold(None, |best: Option<usize>, len| match best {
                Some(b) if b >= len => Some(b),
                _ => Some(len),
            });
        match best {
            Some(len) => {
                if &text[i..gap_end] != sep {
                    push_joined(&mut out, &text[copied..i]);
                    push_joined(&mut out, sep);
                    copied = gap_end;
                    changed = true;
                }
                i = gap_end + len;
            }
            None => i = gap_end,
        }
    }

    changed.then(|| {
        push_joined(&mut out, &text[copied..]);
        out
    })
}

/// `head + whitespace + stem…tail` as a whole word loses the whitespace.
fn circumfix_pass(rules: &[AffixRule], text: &str) -> Option<String> {
    let mut out = String::new();
    let mut copied = 0;
    let mut i = 0;

    while i < text.len() {
        if at_word_start(text, i) {
            let best = rules
                .iter()
                .filter_map(|r| r.match_circumfix(&text[i..]))
                .fold(None, |best: Option<CircumfixMatch>, m| match best {
                    Some(b) if b.len() >= m.len() => Some(b),
                    _ => Some(m),
                });
            if let Some(m) = best {
                let gap_start = i + m.head;
                push_joined(&mut out, &text[copied..gap_start]);
                copied = gap_start + m.gap;
                i += m.len();
                continue;
            }
        }
        i += char_len_at(text, i);
    }

    (copied > 0).then(|| {
        push_joined(&mut out, &text[copied..]);
        out
    })
}

impl Stage for SegmentAffixes {
    fn name(&self) -> &'static str {
        "segment_affixes"
    }

    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError> {
        if !ctx.lang_entry.has_affixes() {
            return Ok(false);
        }
        Ok(self.segment(text, ctx)?.is_some_and(|out| out != text))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        match self.segment(&text, ctx)? {
            Some(out) if out != *text => Ok(Cow::Owned(out)),
            _ => Ok(text),
        }
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for SegmentAffixes {
    fn should_pass_through(lang: crate::lang::Lang) -> &'static [&'static str] {
        if lang == crate::lang::FAS {
            &["کتابها", "نمیرود", "میز", "سلام دنیا", ""]
        } else {
            &["nothing here", "کتاب ها", ""]
        }
    }

    fn should_transform(lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        if lang == crate::lang::FAS {
            &[
                ("کتاب ها", "کتابها"),
                ("نمی\u{200C}رود", "نمیرود"),
                ("هم کاری", "همکاری"),
                ("بی ادب است", "بیادب است"),
            ]
        } else {
            &[]
        }
    }
}
