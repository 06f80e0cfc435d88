use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fourk::board::Position;
use fourk::search::Searcher;

fn bench_search(c: &mut Criterion) {
    let b = Position::startpos();
    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    group.bench_function("search_depth_6_startpos", |ben| {
        let mut s = Searcher::with_hash_mb(16);
        ben.iter(|| {
            s.new_game();
            let r = s.search_depth(black_box(&b), 6);
            black_box(r.nodes)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
