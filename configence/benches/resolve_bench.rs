use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use configence::cast::ListCast;
use configence::delayed::{render, Delayed};
use configence::source::MapSource;
use configence::{Cast, Schema, Value};

fn hero_schema(extra: usize) -> Schema {
    let mut schema = Schema::new("HeroConfig");
    schema.str("MY_HERO").default("Son Goku");
    schema.int("POWER_LEVEL").default(9001);
    schema.bool("IS_STRONG").default(false);
    schema.list("EVENTS").default(Value::from(vec!["event1", "event2"]));
    for i in 0..extra {
        schema.str(&format!("EXTRA_{i}")).default(format!("value {i}"));
    }
    schema.delay("SHOUT", Delayed::template("{MY_HERO} is over {POWER_LEVEL}"));
    schema
}

fn bench_casts(c: &mut Criterion) {
    let mut group = c.benchmark_group("casts");

    let boolean = Cast::boolean();
    group.bench_function("bool", |b| {
        b.iter(|| boolean.apply("IS_STRONG", black_box(&Value::from("TRUE"))));
    });

    let integer = Cast::integer();
    group.bench_function("int", |b| {
        b.iter(|| integer.apply("POWER_LEVEL", black_box(&Value::from("9001"))));
    });

    let list = Cast::list(ListCast::new());
    let raw = Value::from("event1, event2, 'event,3', event4");
    group.bench_function("list", |b| {
        b.iter(|| list.apply("EVENTS", black_box(&raw)));
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let lookup = |name: &str| match name {
        "MY_HERO" => Some(Value::from("Son Goku")),
        "POWER_LEVEL" => Some(Value::Int(9001)),
        _ => None,
    };

    c.bench_function("render_template", |b| {
        b.iter(|| {
            render(
                black_box("{MY_HERO} is over {POWER_LEVEL}, not {MISSING}"),
                lookup,
            )
        });
    });
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let source = MapSource::from_pairs([("MY_HERO", "Vegeta"), ("EVENTS", "a,b,c")]);

    for extra in [0, 10, 100] {
        let schema = hero_schema(extra);
        group.bench_with_input(BenchmarkId::from_parameter(extra), &schema, |b, schema| {
            b.iter(|| schema.load(black_box(&source)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_casts, bench_render, bench_load);
criterion_main!(benches);
