#[cfg(test)]
mod integration_tests {

    use crate::{
        AffixStrategy, CollapseWhitespace, Context, FAS, LocalizeDigits, Normalizer, Pipeline,
        RemoveDiacritics, Stage, StripForeign, StripTatweel,
    };
    use std::borrow::Cow;
    use std::sync::Arc;

    const SENTENCES: &[&str] = &[
        "see <b>this</b> http://x.co/a 2020-01-01T00:00:00Z now",
        "سلام،خوبی؟",
        "این کتاب\u{200C}ها را نمی\u{200C}خوانم",
        "قیمت 1,250 تومان است!!",
        "«کتاب» عربي و فارسي",
        "هم کاری و بی ادبی",
        "قرآن آسمانی",
        "ماء زلال",
        "سلام \u{200C} دنیا",
        "ماء\u{200C}خوب",
        "نمی آب و هم آوازی",
        "",
    ];

    #[test]
    fn full_pipeline_strips_structure() {
        let normalizer = Normalizer::default();
        let input = "see <b>this</b> http://x.co/a 2020-01-01T00:00:00Z now";
        assert_eq!(normalizer.normalize(input).unwrap(), "see this now");
    }

    #[test]
    fn full_pipeline_spaces_punctuation() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize("سلام،خوبی؟").unwrap(), "سلام ، خوبی ؟");
    }

    #[test]
    fn full_pipeline_detaches_affixes() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize("این کتاب\u{200C}ها را نمی\u{200C}خوانم").unwrap(),
            "این کتابها را نمیخوانم"
        );
    }

    #[test]
    fn prefix_separator_is_inserted() {
        let normalizer = Normalizer::builder().prefix_separator("\u{200C}").build();
        assert_eq!(
            normalizer.normalize("نمی\u{200C}خوانم").unwrap(),
            "نمی\u{200C}خوانم"
        );
        assert_eq!(normalizer.normalize("بی ادب").unwrap(), "بی\u{200C}ادب");
    }

    #[test]
    fn full_pipeline_localizes_letters_and_digits() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize("كتاب 12 عربي").unwrap(),
            "کتاب ۱۲ عربی"
        );
    }

    #[test]
    fn full_pipeline_is_idempotent() {
        for strategy in [AffixStrategy::CatalogOrder, AffixStrategy::LongestMatch] {
            let normalizer = Normalizer::builder().affix_strategy(strategy).build();
            for &input in SENTENCES {
                let once = normalizer.normalize_owned(input).unwrap();
                let twice = normalizer.normalize_owned(&once).unwrap();
                assert_eq!(once, twice, "not idempotent on `{input}` ({strategy:?})");
            }
        }
    }

    #[test]
    fn later_stages_leave_nothing_for_earlier_ones() {
        let normalizer = Normalizer::default();
        let cases = [
            // ZWNJ between spaces
            ("سلام \u{200C} دنیا", "سلام دنیا"),
            // padding next to a removed ZWNJ
            ("\u{200C}.ت", " . ت"),
            // hamza before ZWNJ and before punctuation
            ("ماء\u{200C}خوب", "ما خوب"),
            ("ماء،نمینمی", "ما ، نمینمی"),
            // madda after a closed prefix gap
            ("نمی آب", "نمیاب"),
            ("««کتاب»»", "\" کتاب \""),
        ];
        for (input, expected) in cases {
            let once = normalizer.normalize_owned(input).unwrap();
            assert_eq!(once, expected, "{input:?}");
            assert_eq!(normalizer.normalize_owned(&once).unwrap(), once, "{input:?}");
        }
    }

    #[test]
    fn normalized_text_passes_through_borrowed() {
        let normalizer = Normalizer::default();
        for &input in SENTENCES {
            let once = normalizer.normalize_owned(input).unwrap();
            let again = normalizer.normalize(once.as_str()).unwrap();
            assert!(matches!(again, Cow::Borrowed(_)), "`{once}` was rewritten");
        }
    }

    #[test]
    fn one_normalizer_shared_across_threads() {
        let normalizer = Normalizer::default();
        let expected: Vec<String> = SENTENCES
            .iter()
            .map(|s| normalizer.normalize_owned(s).unwrap())
            .collect();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for (input, want) in SENTENCES.iter().zip(&expected) {
                        assert_eq!(&normalizer.normalize_owned(input).unwrap(), want);
                    }
                });
            }
        });
    }

    #[test]
    fn custom_pipeline_subset() {
        let stages: Vec<Arc<dyn Stage>> = vec![
            Arc::new(StripForeign),
            Arc::new(CollapseWhitespace),
            Arc::new(StripTatweel),
            Arc::new(RemoveDiacritics),
            Arc::new(LocalizeDigits),
        ];
        let pipeline = Pipeline::new(stages);
        let out = pipeline
            .process(Cow::Borrowed("س\u{0640}لام\u{064C} hello \u{0663} دنیا"), &Context::new(FAS))
            .unwrap();
        assert_eq!(out, "سلام ۳ دنیا");
    }

    #[test]
    fn normalizer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Normalizer>();
        assert_send_sync::<Context>();
        assert_send_sync::<crate::NormalizeError>();
    }
}
