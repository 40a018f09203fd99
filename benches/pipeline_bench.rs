use std::{borrow::Cow, hint::black_box, sync::Arc, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use farsnorm::{
    AffixStrategy, CollapseWhitespace, Context, FAS, LocalizeDigits, LocalizePunctuation,
    NormalizeHamza, Normalizer, Pipeline, RemoveDiacritics, SegmentAffixes, Stage, StripMarkup,
    StripUrl, UnifyArabicLetters,
};

const SAMPLES: &[(&str, &str)] = &[
    // already normalized, every stage should skip
    ("clean", "این کتابها را نمیخوانم و سلام ، خوبی ؟"),
    // markup, URL and timestamp noise
    (
        "web",
        "<p>خبر <b>مهم</b></p> https://example.ir/news?id=12 2020-01-01T00:00:00Z پایان",
    ),
    // Arabic code points, Latin digits and diacritics
    ("arabic", "كِتَابٌ عربي 1402 قرآن مسئله، مؤمن؟"),
    // affix-heavy running text
    (
        "affixes",
        "کتاب\u{200C}های\u{200C}شان را نمی\u{200C}خوانند و بی ادبی نمی\u{200C}کنند هم کاری",
    ),
];

fn long_text() -> String {
    SAMPLES.iter().map(|(_, s)| *s).collect::<Vec<_>>().join("\n").repeat(200)
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for strategy in [AffixStrategy::CatalogOrder, AffixStrategy::LongestMatch] {
        let normalizer = Normalizer::builder().affix_strategy(strategy).build();
        for &(name, text) in SAMPLES {
            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), name),
                text,
                |b, text| b.iter(|| normalizer.normalize(black_box(text)).unwrap()),
            );
        }
    }

    let text = long_text();
    let normalizer = Normalizer::default();
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("document", |b| {
        b.iter(|| normalizer.normalize(black_box(text.as_str())).unwrap())
    });
    group.finish();
}

fn bench_stage<S: Stage + 'static>(c: &mut Criterion, label: &str, stage: S) {
    let ctx = Context::new(FAS);
    let stages: Vec<Arc<dyn Stage>> = vec![Arc::new(stage)];
    let pipeline = Pipeline::new(stages);

    let mut group = c.benchmark_group(label);
    for &(sample, text) in SAMPLES {
        group.bench_with_input(BenchmarkId::from_parameter(sample), text, |b, text| {
            b.iter(|| pipeline.process(Cow::Borrowed(black_box(text)), &ctx).unwrap())
        });
    }
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    bench_stage(c, "strip_markup", StripMarkup);
    bench_stage(c, "strip_url", StripUrl::default());
    bench_stage(c, "collapse_whitespace", CollapseWhitespace);
    bench_stage(c, "remove_diacritics", RemoveDiacritics);
    bench_stage(c, "unify_arabic_letters", UnifyArabicLetters);
    bench_stage(c, "localize_digits", LocalizeDigits);
    bench_stage(c, "normalize_hamza", NormalizeHamza);
    bench_stage(c, "localize_punctuation", LocalizePunctuation::default());
    bench_stage(c, "segment_affixes", SegmentAffixes::default());
    bench_stage(
        c,
        "segment_affixes_longest",
        SegmentAffixes::default().with_strategy(AffixStrategy::LongestMatch),
    );
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(3))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_full_pipeline, bench_stages
}
criterion_main!(benches);
