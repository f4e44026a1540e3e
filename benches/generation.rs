use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sentence_gen::parser::parse_rule;
use sentence_gen::{Grammar, utils};

fn bench_generate(c: &mut Criterion) {
    let grammar = Grammar::with_defaults();
    let mut rng = utils::rng(Some(0));

    c.bench_function("generate default sentence", |b| {
        b.iter(|| grammar.generate_with(black_box("start"), &mut rng))
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse structural rule", |b| {
        b.iter(|| parse_rule(black_box("<cmplx-noun>,<cmplx-noun><prep-phrase>")))
    });

    c.bench_function("parse word list", |b| {
        b.iter(|| parse_rule(black_box("girl, dog, boy, cat, mouse, robot, teacher")))
    });
}

criterion_group!(benches, bench_generate, bench_parse);
criterion_main!(benches);
