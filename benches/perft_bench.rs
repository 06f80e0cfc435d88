use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fourk::board::movegen::generate;
use fourk::board::{MoveList, Position};
use fourk::perft::perft;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_perft(c: &mut Criterion) {
    let start = Position::startpos();
    let kiwi = Position::from_fen(KIWIPETE).expect("kiwipete");
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);
    group.bench_function("startpos_d4", |ben| ben.iter(|| black_box(perft(black_box(&start), 4))));
    group.bench_function("kiwipete_d3", |ben| ben.iter(|| black_box(perft(black_box(&kiwi), 3))));
    group.finish();

    let mut list = MoveList::new();
    c.bench_function("movegen_kiwipete", |ben| {
        ben.iter(|| {
            generate(black_box(&kiwi), &mut list, false);
            black_box(list.len())
        })
    });
}

criterion_group!(benches, bench_perft);
criterion_main!(benches);
