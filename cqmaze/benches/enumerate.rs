use cqmaze::{
    amplify::Amplifier,
    board::Maze,
    encoding::PathEncoder,
    graph::GridGraph,
    paths::all_simple_paths,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const MAZE: &str = "S000\n0100\n0000\n010G";

pub fn enumerate_paths(c: &mut Criterion) {
    let maze: Maze = MAZE.parse().unwrap();
    let graph = GridGraph::new(&maze);

    c.bench_function("enumerate_paths", |b| {
        b.iter(|| all_simple_paths(black_box(&graph), maze.start(), maze.goal(), None, None))
    });
}

pub fn amplify_paths(c: &mut Criterion) {
    let maze: Maze = MAZE.parse().unwrap();
    let graph = GridGraph::new(&maze);
    let encoder = PathEncoder::new(maze.size()).unwrap();
    let states: Vec<u64> = all_simple_paths(&graph, maze.start(), maze.goal(), None, None)
        .iter()
        .map(|path| encoder.encode(path).unwrap())
        .collect();

    c.bench_function("amplify_paths", |b| {
        b.iter(|| {
            Amplifier::new(encoder.bits())
                .run(black_box(&states))
                .unwrap()
        })
    });
}

criterion_group! {name = benches; config = Criterion::default().sample_size(10); targets = enumerate_paths, amplify_paths}
criterion_main!(benches);
