use criterion::{black_box, criterion_group, criterion_main, Criterion};
use griddle::State;

fn solve_bay(c: &mut Criterion) {
    const BAY: &str =
        "puzzle 6 6\n      \n .... \n .... \n .##. \n .... \n      \nstart 4 2 left\nsausages 1\n1 1 vertical";

    let (initial_state, board) = <State as searchlight_cli::State>::parse(BAY).unwrap();

    c.bench_function("solve_bay", |b| {
        b.iter(|| searchlight::solve(black_box(&initial_state).clone(), &board))
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    solve_bay(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
