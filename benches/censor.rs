#[cfg(feature = "criterion")]
use censore::{Overrides, ProfanityFilter};
#[cfg(feature = "criterion")]
use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[cfg(feature = "criterion")]
fn censor_benchmark(c: &mut Criterion) {
    let filter = ProfanityFilter::new().unwrap();
    let input = "fuck ".repeat(100);

    c.bench_function("censor", |b| {
        b.iter(|| {
            black_box(filter.censor(black_box(&input)));
        })
    });

    let overrides = Overrides::new()
        .languages(&["en", "uk"])
        .custom_patterns(&["lololo"]);
    c.bench_function("censor_with", |b| {
        b.iter(|| {
            black_box(filter.censor_with(black_box(&input), &overrides).unwrap());
        })
    });
}

#[cfg(feature = "criterion")]
fn contains_profanity_benchmark(c: &mut Criterion) {
    let filter = ProfanityFilter::new().unwrap();
    let input = "the quick brown fox jumps over the lazy dog ".repeat(100);

    c.bench_function("contains_profanity", |b| {
        b.iter(|| {
            black_box(filter.contains_profanity(black_box(&input)));
        })
    });
}

#[cfg(feature = "criterion")]
criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(100);
    targets = censor_benchmark, contains_profanity_benchmark
}
#[cfg(feature = "criterion")]
criterion_main!(benches);

#[cfg(not(feature = "criterion"))]
fn main() {}
