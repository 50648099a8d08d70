use criterion::{criterion_group, criterion_main, Criterion};
use nonogram_solver::solver::bitline::full;
use nonogram_solver::solver::{solve_one, verify_unique, Clue, Puzzle, SolveOptions, SIZE};
use std::hint::black_box;

fn options() -> SolveOptions {
    SolveOptions {
        cache_capacity: 1 << 16,
        ..SolveOptions::default()
    }
}

fn box_outline() -> Puzzle {
    let edge = Clue::new([SIZE]).unwrap();
    let mid = Clue::new([1, 1]).unwrap();
    let mut rows = vec![edge.clone()];
    rows.extend(vec![mid; SIZE - 2]);
    rows.push(edge);
    let cols = rows.clone();
    Puzzle::new(rows, cols).unwrap()
}

fn permutation() -> Puzzle {
    let clue = Clue::new([1]).unwrap();
    Puzzle::new(vec![clue.clone(); SIZE], vec![clue; SIZE]).unwrap()
}

fn striped() -> Puzzle {
    let mut grid = [0; SIZE];
    for (r, row) in grid.iter_mut().enumerate() {
        *row = (full() >> (r % 5)) & full();
    }
    Puzzle::from_grid(&grid)
}

fn bench_solve(c: &mut Criterion) {
    let outline = box_outline();
    c.bench_function("solve - box outline", |b| {
        b.iter(|| {
            let report = solve_one(black_box(&outline), &options());
            black_box(report);
        })
    });

    let stripes = striped();
    c.bench_function("solve - stripes", |b| {
        b.iter(|| {
            let report = solve_one(black_box(&stripes), &options());
            black_box(report);
        })
    });

    let ambiguous = permutation();
    c.bench_function("solve - permutation clues", |b| {
        b.iter(|| {
            let report = solve_one(black_box(&ambiguous), &options());
            black_box(report);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let outline = box_outline();
    c.bench_function("verify - box outline", |b| {
        b.iter(|| {
            let report = verify_unique(black_box(&outline), &options());
            black_box(report);
        })
    });
}

criterion_group!(benches, bench_solve, bench_verify);
criterion_main!(benches);
