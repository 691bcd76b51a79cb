use ark_std::test_rng;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use matrix::{Matrix, RowRotator, Strategy};
use rand::Rng;

fn rotate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("row rotation");
    let mut rng = test_rng();

    for (rows, cols) in [(7, 25), (64, 4096), (1024, 1024), (16, 1 << 16)] {
        let matrix = Matrix::from_fn(rows, cols, |_, _| rng.gen::<i32>()).unwrap();

        for strategy in [Strategy::ColumnTasks, Strategy::RowCopy, Strategy::Sequential] {
            let rotator = RowRotator::with_strategy(strategy);
            group
                .bench_function(
                    BenchmarkId::new(format!("{strategy}"), format!("{rows}x{cols}")),
                    |b| {
                        let mut buffer = matrix.clone().into_inner();
                        b.iter(|| rotator.rotate(&mut buffer, rows, cols).unwrap())
                    },
                )
                .sample_size(10);
        }
    }
}

criterion_group!(benches, rotate_benchmark);
criterion_main!(benches);
