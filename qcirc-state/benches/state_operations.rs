//! Benchmarks for state vector operations
//!
//! Compares the sequential and rayon kernel paths and measures sampling cost

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qcirc_gates::matrices;
use qcirc_state::DenseState;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn prepared_state(num_qubits: usize, parallel_threshold: usize) -> DenseState {
    let mut state = DenseState::new(num_qubits)
        .unwrap()
        .with_parallel_threshold(parallel_threshold);
    for q in 0..num_qubits {
        state.apply_gate(&matrices::HADAMARD, q).unwrap();
    }
    state
}

fn bench_single_qubit_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_qubit_gate");

    for num_qubits in [10, 15, 20] {
        group.throughput(Throughput::Elements(1u64 << num_qubits));

        for (label, threshold) in [("sequential", usize::MAX), ("parallel", 0)] {
            group.bench_with_input(
                BenchmarkId::new(label, num_qubits),
                &num_qubits,
                |b, &n| {
                    let mut state = prepared_state(n, threshold);
                    let rx = matrices::rotation_x(0.3);
                    b.iter(|| {
                        state.apply_gate(black_box(&rx), n / 2).unwrap();
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_controlled_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("controlled_gate");

    for num_qubits in [10, 15, 20] {
        group.throughput(Throughput::Elements(1u64 << num_qubits));

        group.bench_with_input(
            BenchmarkId::new("toffoli", num_qubits),
            &num_qubits,
            |b, &n| {
                let mut state = prepared_state(n, 14);
                b.iter(|| {
                    state
                        .apply_controlled_gate(black_box(&matrices::PAULI_X), &[0, 1], n - 1)
                        .unwrap();
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("swap", num_qubits), &num_qubits, |b, &n| {
            let mut state = prepared_state(n, 14);
            b.iter(|| {
                state.apply_swap(black_box(0), n - 1).unwrap();
            })
        });
    }

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");

    for num_qubits in [4, 10, 16] {
        group.throughput(Throughput::Elements(1024));

        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &num_qubits,
            |b, &n| {
                let state = prepared_state(n, 14);
                let mut rng = StdRng::seed_from_u64(7);
                b.iter(|| black_box(state.measure_with(1024, &mut rng)))
            },
        );
    }

    group.finish();
}

fn bench_bloch_vectors(c: &mut Criterion) {
    let state = prepared_state(12, 14);
    c.bench_function("bloch_vectors_12q", |b| {
        b.iter(|| black_box(state.bloch_vectors()))
    });
}

criterion_group!(
    benches,
    bench_single_qubit_gate,
    bench_controlled_gate,
    bench_sampling,
    bench_bloch_vectors
);
criterion_main!(benches);
