#![allow(clippy::needless_return)]
use periodic_lj::{Calculator, CalculationOptions, NeighborStrategy};
use periodic_lj::{Configuration, Matrix3, UnitCell, Vector3D};

use criterion::{BenchmarkGroup, Criterion, measurement::WallTime, SamplingMode};
use criterion::{criterion_group, criterion_main};

/// Slightly distorted FCC crystal with `n x n x n` conventional cells
fn fcc_crystal(n: usize) -> Configuration {
    let a = 3.6;
    let cell = UnitCell::cubic(a * n as f64).expect("invalid cell");
    let mut configuration = Configuration::new(cell);

    let basis = [[0.0, 0.0, 0.0], [0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0]];
    let mut counter = 0;
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                for site in &basis {
                    // deterministic distortion, to break the symmetry
                    let distortion = 0.01 * f64::sin(counter as f64);
                    counter += 1;

                    configuration.add_particle(Vector3D::new(
                        a * (i as f64 + site[0]) + distortion,
                        a * (j as f64 + site[1]) - distortion,
                        a * (k as f64 + site[2]) + 0.5 * distortion,
                    ));
                }
            }
        }
    }

    return configuration;
}

fn run_lennard_jones(mut group: BenchmarkGroup<WallTime>, strategy: NeighborStrategy, test_mode: bool) {
    let sizes: &[usize] = if test_mode {
        // Reduce the time required to test the benchmarks code
        &[1]
    } else {
        &[2, 3, 5]
    };

    let options = CalculationOptions {
        strategy: strategy,
        ..Default::default()
    };
    let parameters = r#"{"sigma": 2.3, "epsilon": 0.4, "cutoff": 6.0}"#;
    let calculator = Calculator::lennard_jones(parameters, options).unwrap();

    for &n in sizes {
        let configuration = fcc_crystal(n);
        let n_particles = configuration.size();

        group.bench_function(&format!("{} particles", n_particles), |b| b.iter_custom(|repeat| {
            let start = std::time::Instant::now();
            for _ in 0..repeat {
                calculator.compute(&configuration, &Matrix3::zero()).unwrap();
            }
            start.elapsed() / n_particles as u32
        }));
    }
}

fn lennard_jones(c: &mut Criterion) {
    let test_mode = std::env::args().any(|arg| arg == "--test");

    let mut group = c.benchmark_group("Lennard-Jones (per atom)/Dense distances");
    group.noise_threshold(0.05);
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(10);

    run_lennard_jones(group, NeighborStrategy::Dense, test_mode);

    let mut group = c.benchmark_group("Lennard-Jones (per atom)/One-way neighbors");
    group.noise_threshold(0.05);
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(10);

    run_lennard_jones(group, NeighborStrategy::OneWay, test_mode);
}

criterion_group!(all, lennard_jones);
criterion_main!(all);
