use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use smarttable::*;

fn make_rows(size: i64) -> Vec<Row> {
    (0..size)
        .map(|i| {
            Row::new(vec![
                CellValue::Int((i * 37) % 201 - 100),
                CellValue::String(format!("user{}@example.com", i)),
                CellValue::Float(i as f64 * 0.5),
            ])
        })
        .collect()
}

fn bench_expression_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression_parse");

    for text in [">=10", ">0&&<50", "smith||jones", "!^user1[0-9]"] {
        group.bench_with_input(BenchmarkId::from_parameter(text), text, |b, text| {
            b.iter(|| FilterExpr::parse(black_box(text)).unwrap());
        });
    }
    group.finish();
}

fn bench_filter_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_engine");

    for size in [1000, 10000, 100000].iter() {
        let rows = make_rows(*size);
        let mut filters = FilterSet::new(3);
        filters.set_text(0, ">0&&<50").unwrap().unwrap();
        filters.set_text(1, "7").unwrap().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| RowFilterEngine::apply(black_box(&rows), &filters));
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_numeric");

    for size in [1000, 10000, 100000].iter() {
        let rows = make_rows(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| SortEngine::sorted(black_box(&rows), SortKey::descending(0)));
        });
    }
    group.finish();
}

fn bench_grow_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("grow_to_end");

    for size in [1000, 10000, 100000].iter() {
        let rows = make_rows(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut store = PagedRowStore::new(
                    Schema::new(vec!["num", "email", "half"]),
                    rows.clone(),
                    StoreConfig::default(),
                )
                .unwrap();
                while store.can_grow() {
                    store.grow();
                }
                black_box(store.row_count())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_expression_parse,
    bench_filter_engine,
    bench_sort,
    bench_grow_to_end,
);

criterion_main!(benches);
