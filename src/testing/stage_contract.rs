use crate::{lang::Lang, stage::Stage};

/// Trait that stages implement to opt into the universal test suite.
pub trait StageTestConfig: Stage + Sized {
    /// General test samples (may or may not trigger changes).
    fn samples(_lang: Lang) -> &'static [&'static str] {
        &[
            "سلام دنیا ۱۲۳",
            "Hello World 123",
            "كتاب‌های من",
            "<p>متن</p> https://example.com",
            "",
        ]
    }

    /// Samples that should pass through unchanged (zero-copy test).
    fn should_pass_through(_lang: Lang) -> &'static [&'static str] {
        &["سلام", "abc", ""]
    }

    /// Input/output pairs that verify correct transformations.
    fn should_transform(_lang: Lang) -> &'static [(&'static str, &'static str)] {
        &[]
    }
}

/// Assert that a stage satisfies the universal stage contracts.
///
/// 1. `zero_copy_when_no_changes` → no allocation when input == output
/// 2. `stage_is_idempotent` → applying twice yields same result as once
/// 3. `needs_apply_is_accurate` → predicts exactly whether apply() changes text
/// 4. `handles_empty_string` → empty in, empty out, borrowed
/// 5. `no_panic_on_mixed_scripts` → survives pathological real-world input
///
/// Failure of any contract is a bug in the stage.
#[macro_export]
macro_rules! assert_stage_contract {
    ($stage:expr) => {
        let stage = $stage;
        $crate::testing::stage_contract::zero_copy_when_no_changes(&stage);
        $crate::testing::stage_contract::stage_is_idempotent(&stage);
        $crate::testing::stage_contract::needs_apply_is_accurate(&stage);
        $crate::testing::stage_contract::handles_empty_string(&stage);
        $crate::testing::stage_contract::no_panic_on_mixed_scripts(&stage);
    };
}

// ============================================================================
// Universal contract tests
// ============================================================================

use crate::{all_langs, context::Context};
use std::borrow::Cow;

fn run<'a, S: Stage>(stage: &S, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
    if stage.needs_apply(&text, ctx).unwrap() {
        stage.apply(text, ctx).unwrap()
    } else {
        text
    }
}

pub fn zero_copy_when_no_changes<S: StageTestConfig>(stage: &S) {
    for &lang in all_langs() {
        let ctx = Context::new(lang);

        for &input in S::samples(lang) {
            // apply() itself must hand back the borrowed input when unchanged
            let out = stage.apply(Cow::Borrowed(input), &ctx).unwrap();
            if out.as_ref() == input {
                assert!(
                    matches!(out, Cow::Borrowed(s) if std::ptr::eq(s, input)),
                    "`{}` allocated without changing `{input}` ({lang:?})",
                    stage.name()
                );
            }
        }

        for &pass_through in S::should_pass_through(lang) {
            let out = run(stage, Cow::Borrowed(pass_through), &ctx);
            assert_eq!(out.as_ref(), pass_through);
            assert!(
                matches!(out, Cow::Borrowed(s) if std::ptr::eq(s, pass_through)),
                "zero-copy violated on pass-through sample (lang: {lang:?}, input: `{pass_through}`)"
            );
        }

        for &(input, expected) in S::should_transform(lang) {
            let out = run(stage, Cow::Borrowed(input), &ctx);
            assert_eq!(out.as_ref(), expected, "`{}` on `{input}` ({lang:?})", stage.name());
        }
    }
}

pub fn stage_is_idempotent<S: StageTestConfig>(stage: &S) {
    for &lang in all_langs() {
        let ctx = Context::new(lang);
        let transformed = S::should_transform(lang).iter().map(|(i, _)| *i);
        for input in S::samples(lang).iter().copied().chain(transformed) {
            let once = run(stage, Cow::Borrowed(input), &ctx).into_owned();
            let twice = run(stage, Cow::Borrowed(once.as_str()), &ctx).into_owned();
            assert_eq!(once, twice, "`{}` not idempotent on `{input}` ({lang:?})", stage.name());
        }
    }
}

pub fn needs_apply_is_accurate<S: StageTestConfig>(stage: &S) {
    for &lang in all_langs() {
        let ctx = Context::new(lang);
        let transformed = S::should_transform(lang).iter().map(|(i, _)| *i);
        let inputs = S::samples(lang)
            .iter()
            .chain(S::should_pass_through(lang))
            .copied()
            .chain(transformed);
        for input in inputs {
            let predicted = stage.needs_apply(input, &ctx).unwrap();
            let changed = stage.apply(Cow::Borrowed(input), &ctx).unwrap() != input;
            assert_eq!(
                predicted,
                changed,
                "`{}`.needs_apply mispredicted on `{input}` ({lang:?})",
                stage.name()
            );
        }
    }
}

pub fn handles_empty_string<S: StageTestConfig>(stage: &S) {
    for &lang in all_langs() {
        let ctx = Context::new(lang);
        assert!(!stage.needs_apply("", &ctx).unwrap());
        let out = stage.apply(Cow::Borrowed(""), &ctx).unwrap();
        assert!(out.is_empty());
    }
}

pub fn no_panic_on_mixed_scripts<S: StageTestConfig>(stage: &S) {
    const NASTY: &[&str] = &[
        "<<>>",
        "<b",
        "a>b<",
        "\u{200C}\u{200C}\u{200C}",
        "ـــــ",
        "ءءء ",
        "آ",
        " آ",
        "???...!!!،،،",
        "http://",
        "نمی",
        " ها",
        "هم ی",
        "2020-01-01T00:00:00",
        "\"\"**\"\"",
        "مرحبا 👋🏽 世界 ١٢٣ 123 ۱۲۳",
        "\n\n\n   \t",
        "\u{064B}\u{0650}\u{0652}",
    ];
    for &lang in all_langs() {
        let ctx = Context::new(lang);
        for &input in NASTY {
            let _ = run(stage, Cow::Borrowed(input), &ctx);
        }
    }
}
