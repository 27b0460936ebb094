use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::fmt::Write;
use wc_gen::prelude::*;

// A chain of entities where each one composes the previous entity and
// carries one field of every primitive kind.
fn schema_source(entities: usize) -> String {
    let mut source = String::new();

    for i in 0..entities {
        writeln!(source, "[[entity]]\nname = \"Entity{i}\"\nfields = [").unwrap();
        for (n, ty) in ["i8", "u16", "i32", "u64", "f32", "f64", "bool", "string", "i32[]"]
            .iter()
            .enumerate()
        {
            writeln!(source, "    {{ name = \"f{n}\", type = \"{ty}\" }},").unwrap();
        }
        if i > 0 {
            writeln!(source, "    {{ name = \"prev\", type = \"Entity{}\" }},", i - 1).unwrap();
            writeln!(source, "    {{ name = \"history\", type = \"Entity{}[]\" }},", i - 1).unwrap();
        }
        writeln!(source, "]\n").unwrap();
    }

    source
}

fn bench_emit_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit_all");
    let config = GeneratorConfig::default();

    for size in [10, 100, 500] {
        let schemas = parse_schema_from_str(&schema_source(size))
            .unwrap()
            .into_schema_set()
            .unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("cpp", size), &schemas, |b, schemas| {
            b.iter(|| {
                let report = Emitter::new(black_box(schemas), &config).emit_all();
                assert!(report.is_complete());
                report
            })
        });
    }

    group.finish();
}

fn bench_parse_source(c: &mut Criterion) {
    let source = schema_source(100);

    c.bench_function("parse_schema_100", |b| {
        b.iter(|| {
            parse_schema_from_str(black_box(&source))
                .unwrap()
                .into_schema_set()
                .unwrap()
        })
    });
}

fn bench_instance_clone(c: &mut Criterion) {
    let schemas = parse_schema_from_str(&schema_source(20))
        .unwrap()
        .into_schema_set()
        .unwrap();
    let instance = Instance::default_of(&schemas, "Entity19").unwrap();

    c.bench_function("instance_clone_depth_20", |b| b.iter(|| black_box(&instance).clone()));
}

criterion_group!(benches, bench_emit_all, bench_parse_source, bench_instance_clone);
criterion_main!(benches);
