//! Affix catalogs and their compiled matchers.
//!
//! A catalog is plain data: per affix class, an ordered list of surface
//! patterns. Patterns are letters plus the repetition markers `?`, `*`, `+`
//! applying to the preceding letter; a circumfix is written `head …tail`
//! (the space marks the gap that is closed, `…` the stem).
//!
//! Within a class, a pattern never comes after a shorter one that already
//! matches a prefix of it, otherwise the shorter one would consume the
//! longer affix first.

use crate::{
    lang::{ALL_LANGS, LocaleBehavior},
    unicode::{NON_WORD_CLASS, WORD_CLASS},
};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Stem placeholder in circumfix patterns.
pub const STEM: char = '…';

/// Regex syntax that catalog patterns may not use.
const RESERVED: &[char] = &['\\', '.', '^', '$', '|', '(', ')', '[', ']', '{', '}'];

#[derive(Debug, Error)]
pub enum AffixError {
    #[error("affix pattern `{pattern}` in class `{class}` uses unsupported syntax `{found}`")]
    UnsupportedSyntax {
        class: &'static str,
        pattern: &'static str,
        found: char,
    },
    #[error("affix pattern `{pattern}` in class `{class}` starts with a repetition marker")]
    DanglingMarker {
        class: &'static str,
        pattern: &'static str,
    },
    #[error("circumfix pattern `{0}` must have the form `head …tail`")]
    MalformedCircumfix(&'static str),
    #[error("affix pattern `{pattern}` failed to compile: {source}")]
    Regex {
        pattern: &'static str,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffixClass {
    PrefixInflectional,
    PrefixLexical,
    SuffixInflectional,
    SuffixLexical,
    CircumfixLexical,
}

/// Where an affix attaches to its stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixPosition {
    Prefix,
    Suffix,
    Circumfix,
}

impl AffixClass {
    /// Fixed processing order.
    pub const ORDER: [AffixClass; 5] = [
        AffixClass::PrefixInflectional,
        AffixClass::PrefixLexical,
        AffixClass::SuffixInflectional,
        AffixClass::SuffixLexical,
        AffixClass::CircumfixLexical,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            AffixClass::PrefixInflectional => "prefix_inflectional",
            AffixClass::PrefixLexical => "prefix_lexical",
            AffixClass::SuffixInflectional => "suffix_inflectional",
            AffixClass::SuffixLexical => "suffix_lexical",
            AffixClass::CircumfixLexical => "circumfix_lexical",
        }
    }

    pub const fn position(self) -> AffixPosition {
        match self {
            AffixClass::PrefixInflectional | AffixClass::PrefixLexical => AffixPosition::Prefix,
            AffixClass::SuffixInflectional | AffixClass::SuffixLexical => AffixPosition::Suffix,
            AffixClass::CircumfixLexical => AffixPosition::Circumfix,
        }
    }
}

/// Ordered surface patterns per affix class.
#[derive(Debug)]
pub struct AffixCatalog {
    classes: &'static [(AffixClass, &'static [&'static str])],
}

impl AffixCatalog {
    pub const fn new(classes: &'static [(AffixClass, &'static [&'static str])]) -> Self {
        Self { classes }
    }

    pub fn patterns(&self, class: AffixClass) -> &'static [&'static str] {
        self.classes
            .iter()
            .find(|(c, _)| *c == class)
            .map_or(&[], |(_, patterns)| *patterns)
    }

    pub fn try_compile(&self) -> Result<CompiledCatalog, AffixError> {
        let mut rules = Vec::with_capacity(AffixClass::ORDER.len());
        for class in AffixClass::ORDER {
            let compiled = self
                .patterns(class)
                .iter()
                .map(|pattern| AffixRule::compile(class, pattern))
                .collect::<Result<Vec<_>, _>>()?;
            rules.push((class, compiled));
        }
        Ok(CompiledCatalog { rules })
    }
}

/// The pattern with its repetition markers removed: the longest plain form
/// it was written for (`تری?` → `تری`, `ن?می` → `نمی`).
pub fn literal(pattern: &str) -> String {
    pattern
        .chars()
        .filter(|c| !matches!(c, '?' | '*' | '+'))
        .collect()
}

fn validate(class: AffixClass, pattern: &'static str) -> Result<(), AffixError> {
    if let Some(found) = pattern.chars().find(|c| RESERVED.contains(c)) {
        return Err(AffixError::UnsupportedSyntax {
            class: class.name(),
            pattern,
            found,
        });
    }
    if pattern.starts_with(['?', '*', '+']) || pattern.is_empty() {
        return Err(AffixError::DanglingMarker {
            class: class.name(),
            pattern,
        });
    }
    Ok(())
}

/// One catalog pattern compiled into an anchored matcher.
#[derive(Debug)]
pub struct AffixRule {
    class: AffixClass,
    pattern: &'static str,
    regex: Regex,
}

/// A prefix at the start of the text, followed by its gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch {
    pub affix: usize,
    pub gap: usize,
}

/// A circumfixed compound at the start of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircumfixMatch {
    pub head: usize,
    pub gap: usize,
    pub stem: usize,
}

impl CircumfixMatch {
    pub fn len(&self) -> usize {
        self.head + self.gap + self.stem
    }
}

impl AffixRule {
    pub fn compile(class: AffixClass, pattern: &'static str) -> Result<Self, AffixError> {
        let source = match class.position() {
            AffixPosition::Prefix => {
                validate(class, pattern)?;
                format!(r"\A({pattern})({NON_WORD_CLASS}+)")
            }
            AffixPosition::Suffix => {
                validate(class, pattern)?;
                format!(r"\A({pattern})(?:{NON_WORD_CLASS}|\z)")
            }
            AffixPosition::Circumfix => {
                let (head, tail) = pattern
                    .split_once(STEM)
                    .map(|(h, t)| (h.trim_end(), t))
                    .filter(|(h, t)| !h.is_empty() && !t.is_empty())
                    .ok_or(AffixError::MalformedCircumfix(pattern))?;
                if let Some(found) = head.chars().chain(tail.chars()).find(|c| {
                    RESERVED.contains(c) || matches!(c, '?' | '*' | '+') || c.is_whitespace()
                }) {
                    return Err(AffixError::UnsupportedSyntax {
                        class: class.name(),
                        pattern,
                        found,
                    });
                }
                format!(r"\A({head})(\s)({WORD_CLASS}+{tail})(?:{NON_WORD_CLASS}|\z)")
            }
        };
        let regex = Regex::new(&source).map_err(|source| AffixError::Regex { pattern, source })?;
        Ok(Self {
            class,
            pattern,
            regex,
        })
    }

    pub fn class(&self) -> AffixClass {
        self.class
    }

    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Prefix followed by at least one non-word character.
    pub fn match_prefix(&self, text: &str) -> Option<PrefixMatch> {
        let caps = self.regex.captures(text)?;
        Some(PrefixMatch {
            affix: caps.get(1)?.len(),
            gap: caps.get(2)?.len(),
        })
    }

    /// Byte length of a suffix followed by a non-word character or the end.
    pub fn match_suffix(&self, text: &str) -> Option<usize> {
        Some(self.regex.captures(text)?.get(1)?.len())
    }

    pub fn match_circumfix(&self, text: &str) -> Option<CircumfixMatch> {
        let caps = self.regex.captures(text)?;
        Some(CircumfixMatch {
            head: caps.get(1)?.len(),
            gap: caps.get(2)?.len(),
            stem: caps.get(3)?.len(),
        })
    }
}

/// A catalog with every pattern compiled, in processing order.
#[derive(Debug)]
pub struct CompiledCatalog {
    rules: Vec<(AffixClass, Vec<AffixRule>)>,
}

impl CompiledCatalog {
    pub fn rules(&self, class: AffixClass) -> &[AffixRule] {
        self.rules
            .iter()
            .find(|(c, _)| *c == class)
            .map_or(&[], |(_, rules)| rules.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rules.iter().map(|(_, r)| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static COMPILED: LazyLock<Result<HashMap<&'static str, CompiledCatalog>, AffixError>> =
    LazyLock::new(|| {
        let mut compiled = HashMap::new();
        for lang in ALL_LANGS {
            if let Some(catalog) = lang.entry().affixes {
                let catalog = catalog.try_compile()?;
                tracing::debug!(lang = lang.code(), rules = catalog.len(), "compiled affix catalog");
                compiled.insert(lang.code(), catalog);
            }
        }
        Ok(compiled)
    });

/// Compiled catalog of `lang`, `Ok(None)` for locales without affixes.
pub fn compiled_for(
    lang: crate::lang::Lang,
) -> Result<Option<&'static CompiledCatalog>, &'static AffixError> {
    match &*COMPILED {
        Ok(map) => Ok(map.get(lang.code())),
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
//    Persian affixes
// ---------------------------------------------------------------------------
pub static PERSIAN_AFFIXES: AffixCatalog = AffixCatalog::new(&[
    (AffixClass::PrefixInflectional, &["ن?می"]),
    (AffixClass::PrefixLexical, &["نا", "بی", "فرا", "سوء", "غیر"]),
    (
        AffixClass::SuffixInflectional,
        &[
            "هایمان", "هایتان", "هایشان", "هایم", "هایت", "هایش", "ها ای", "های*", "ترین",
            "تری?", "مان", "تان", "شان", "ای+", "ام", "ات", "اش", "ی+",
        ],
    ),
    (
        AffixClass::SuffixLexical,
        &[
            "اید", "ایم", "ای", "اندازی?", "اند", "ام", "جاتی?", "آوری?", "نشینی?", "کنندگان",
            "کنندگی", "کننده", "پاشی?", "پوشانی?", "پوشی?", "شناسانی?", "شناسی?", "پذیرانی?",
            "پذیری?", "ناپذیری?", "شکنانی?", "شکنی?", "فشانی?", "سازی?", "آلودی?", "آمیزی?",
            "زدای*", "خوردگی", "زدگی", "انگیزی?", "خیزی?", "سوزی?", "پراکنی", "خوری", "افکنی?",
            "دانی?", "گرفتگی", "المللی?", "پروری?", "پریشی?", "نویسی?", "واره", "وار",
            "کارانی?", "پژوهی?", "سنجی?", "بانی?", "کنان", "پردازی?", "رسانی?", "یابی?", "پیما",
            "گیری?", "گری?", "مندانی?", "مندی?", "ساعته", "ور",
        ],
    ),
    (AffixClass::CircumfixLexical, &["هم …ی"]),
]);

#[cfg(test)]
mod tests {
    use super::*;

    fn full_match(rule_pattern: &str, text: &str) -> bool {
        Regex::new(&format!(r"\A(?:{rule_pattern})\z"))
            .unwrap()
            .is_match(text)
    }

    #[test]
    fn persian_catalog_compiles() {
        let compiled = PERSIAN_AFFIXES.try_compile().unwrap();
        let total: usize = AffixClass::ORDER
            .iter()
            .map(|c| PERSIAN_AFFIXES.patterns(*c).len())
            .sum();
        assert_eq!(compiled.len(), total);
    }

    #[test]
    fn longer_patterns_precede_their_prefixes() {
        for class in AffixClass::ORDER {
            if class.position() == AffixPosition::Circumfix {
                continue;
            }
            let patterns = PERSIAN_AFFIXES.patterns(class);
            for (i, earlier) in patterns.iter().enumerate() {
                for later in &patterns[i + 1..] {
                    let lit: Vec<char> = literal(later).chars().collect();
                    for cut in 1..lit.len() {
                        let head: String = lit[..cut].iter().collect();
                        assert!(
                            !full_match(earlier, &head),
                            "{}: `{earlier}` would consume `{head}` of later `{later}`",
                            class.name()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn no_duplicate_patterns_within_a_class() {
        for class in AffixClass::ORDER {
            let patterns = PERSIAN_AFFIXES.patterns(class);
            for (i, p) in patterns.iter().enumerate() {
                assert!(!patterns[i + 1..].contains(p), "{}: `{p}` listed twice", class.name());
            }
        }
    }

    #[test]
    fn rejects_regex_syntax() {
        let err = AffixRule::compile(AffixClass::SuffixLexical, "ها|ان").unwrap_err();
        assert!(matches!(err, AffixError::UnsupportedSyntax { found: '|', .. }));
        let err = AffixRule::compile(AffixClass::PrefixLexical, "?نا").unwrap_err();
        assert!(matches!(err, AffixError::DanglingMarker { .. }));
    }

    #[test]
    fn rejects_malformed_circumfix() {
        for bad in ["همی", "…ی", "هم …", "ه?م …ی"] {
            assert!(
                AffixRule::compile(AffixClass::CircumfixLexical, bad).is_err(),
                "`{bad}` accepted"
            );
        }
    }

    #[test]
    fn prefix_needs_a_gap() {
        let rule = AffixRule::compile(AffixClass::PrefixInflectional, "ن?می").unwrap();
        assert_eq!(
            rule.match_prefix("نمی رود"),
            Some(PrefixMatch { affix: "نمی".len(), gap: 1 })
        );
        assert_eq!(
            rule.match_prefix("می\u{200C}روم"),
            Some(PrefixMatch { affix: "می".len(), gap: "\u{200C}".len() })
        );
        assert_eq!(rule.match_prefix("میز"), None);
    }

    #[test]
    fn suffix_backtracks_to_reach_a_boundary() {
        let rule = AffixRule::compile(AffixClass::SuffixInflectional, "های*").unwrap();
        assert_eq!(rule.match_suffix("های "), Some("های".len()));
        assert_eq!(rule.match_suffix("ها"), Some("ها".len()));
        assert_eq!(rule.match_suffix("هایم"), None);
    }

    #[test]
    fn circumfix_matches_whole_word_ending_in_tail() {
        let rule = AffixRule::compile(AffixClass::CircumfixLexical, "هم …ی").unwrap();
        let m = rule.match_circumfix("هم کاری کنیم").unwrap();
        assert_eq!(m.head, "هم".len());
        assert_eq!(m.gap, 1);
        assert_eq!(m.stem, "کاری".len());
        assert_eq!(rule.match_circumfix("هم کارها"), None);
        assert_eq!(rule.match_circumfix("هم ی"), None);
    }

    #[test]
    fn only_persian_has_a_compiled_catalog() {
        use crate::lang::{ENG, FAS};
        assert!(compiled_for(FAS).unwrap().is_some());
        assert!(compiled_for(ENG).unwrap().is_none());
    }

    #[test]
    fn literal_strips_markers() {
        assert_eq!(literal("ن?می"), "نمی");
        assert_eq!(literal("های*"), "های");
        assert_eq!(literal("ها ای"), "ها ای");
    }
}
