use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pagesim::{compare, Policy, SimulationInput};

// Deterministic pseudo-random reference string with some locality.
fn generate_references(len: usize, universe: i64) -> Vec<i64> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut last = 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            // Three times out of four stay near the previous page.
            last = if state % 4 == 0 {
                (state % universe as u64) as i64 + 1
            } else {
                (last + (state % 3) as i64 - 1).clamp(1, universe)
            };
            last
        })
        .collect()
}

fn policy_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Policy");

    for len in [100, 1_000, 10_000].iter() {
        let refs = generate_references(*len, 32);
        for policy in Policy::ALL {
            let input = SimulationInput::new(&refs, 8, policy.name()).unwrap();
            group.bench_with_input(BenchmarkId::new(policy.name(), len), &input, |b, input| {
                b.iter(|| black_box(input.run()));
            });
        }
    }

    group.finish();
}

fn comparison_benchmark(c: &mut Criterion) {
    let refs = generate_references(5_000, 32);
    c.bench_function("compare_all_policies", |b| {
        b.iter(|| black_box(compare(&refs, 8, &[]).unwrap()));
    });
}

criterion_group!(benches, policy_benchmark, comparison_benchmark);
criterion_main!(benches);
