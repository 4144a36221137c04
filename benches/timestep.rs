use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use d2q9_bgk::{Params, Simulation};

fn setup_sim(size: usize) -> Simulation {
    let params = Params {
        nx: size,
        ny: size,
        max_iters: 1,
        reynolds_dim: size,
        density: 0.1,
        accel: 0.005,
        omega: 1.85,
    };
    // a square block in the middle of the channel
    let obstacles: Vec<_> = (size / 4..size / 2)
        .flat_map(|y| (size / 4..size / 2).map(move |x| (x, y)))
        .collect();
    Simulation::new(params, &obstacles).unwrap()
}

fn bench_timestep(c: &mut Criterion) {
    let mut group = c.benchmark_group("timestep");
    for size in [128, 256, 1024] {
        let mut sim = setup_sim(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(sim.step().unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_timestep);
criterion_main!(benches);
