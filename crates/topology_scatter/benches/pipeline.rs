mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use topology_scatter::prelude::*;

fn bench_config() -> TopologyConfig {
    TopologyConfig::default().with_max_connection_attempts(50_000)
}

/// Finds a seed whose layout satisfies every connection constraint.
fn satisfiable_seed(generator: &TopologyGenerator) -> Option<u64> {
    (0..256u64).find(|&seed| {
        generator
            .build_topology(&mut StdRng::seed_from_u64(seed))
            .is_ok()
    })
}

fn pipeline_benches(c: &mut Criterion) {
    let Ok(generator) = TopologyGenerator::try_new(bench_config()) else {
        return;
    };
    let Some(seed) = satisfiable_seed(&generator) else {
        eprintln!("no satisfiable seed found; skipping pipeline benches");
        return;
    };
    let Ok((topology, _)) = generator.build_topology(&mut StdRng::seed_from_u64(seed)) else {
        return;
    };

    let mut group = c.benchmark_group("pipeline/connections");
    group.throughput(common::elements_throughput(topology.connections().len()));
    group.bench_function("build_topology", |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(seed),
            |mut rng| {
                let built = generator.build_topology(&mut rng);
                black_box(built.map(|(t, _)| t.connections().len()).unwrap_or(0));
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();

    let render_config = RenderConfig::from(&generator.config);
    let mut group = c.benchmark_group("pipeline/raster");
    group.throughput(common::elements_throughput(
        topology.connections().len() + topology.assigned_nodes().count(),
    ));
    group.bench_function("render_topology", |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(seed ^ 0xC0105),
            |mut rng| {
                let canvas = render_topology(&topology, &render_config, &mut rng);
                black_box(canvas.pixels().len());
            },
            BatchSize::SmallInput,
        );
    });

    let canvas = render_topology(
        &topology,
        &render_config,
        &mut StdRng::seed_from_u64(seed),
    );
    group.bench_function("encode_png", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            let written = canvas.write_png(&mut out).map(|_| out.len());
            black_box(written.unwrap_or(0));
        });
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = pipeline_benches
}
criterion_main!(benches);
