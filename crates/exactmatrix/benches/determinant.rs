use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use exactmatrix::{AbsorbingChain, Fraction, SquareMatrix};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random square matrix of small fractions
fn random_matrix(n: usize, seed: u64) -> SquareMatrix<Fraction> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    SquareMatrix::from_fn(n, |_, _| {
        Fraction::of(rng.random_range(-9..=9), rng.random_range(1..=4))
    })
    .unwrap()
}

/// Chain with `n` transient states feeding forward and two absorbing states
fn random_chain(n: usize, seed: u64) -> AbsorbingChain {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let size = n + 2;
    let rows = (0..size)
        .map(|i| {
            let mut row = vec![Fraction::ZERO; size];
            if i >= n {
                row[i] = Fraction::ONE;
                return row;
            }
            // stay, advance or get absorbed, weights summing to one
            let weights: Vec<i64> = (0..3).map(|_| rng.random_range(1..=5)).collect();
            let total: i64 = weights.iter().sum();
            row[i] = Fraction::of(weights[0], total);
            row[i + 1] = row[i + 1] + Fraction::of(weights[1], total);
            row[size - 1] = row[size - 1] + Fraction::of(weights[2], total);
            row
        })
        .collect();
    AbsorbingChain::new(SquareMatrix::new(rows).unwrap())
}

fn bench_cofactor_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("cofactor_expansion");

    for &size in &[2, 3, 4, 5, 6] {
        let m = random_matrix(size, 42);
        group.bench_with_input(BenchmarkId::new("determinant", size), &m, |b, m| {
            b.iter(|| black_box(m.determinant()));
        });
        group.bench_with_input(BenchmarkId::new("inverse", size), &m, |b, m| {
            b.iter(|| black_box(m.inverse()));
        });
    }

    group.finish();
}

fn bench_absorption(c: &mut Criterion) {
    let mut group = c.benchmark_group("absorption_probabilities");

    for &transient in &[1, 2, 3, 4, 5] {
        group.bench_with_input(
            BenchmarkId::new("fresh_chain", transient),
            &transient,
            |b, &n| {
                b.iter_batched(
                    || random_chain(n, 7),
                    |chain| black_box(chain.absorption_probabilities().unwrap()),
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_cofactor_expansion, bench_absorption);
criterion_main!(benches);
