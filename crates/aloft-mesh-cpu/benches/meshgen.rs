use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use aloft_mesh_cpu::build_chunk_mesh;
use aloft_world::{ChunkCoord, TerrainParams, WorldSeed};

fn bench_build_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_chunk_mesh");
    let seed = WorldSeed::generate(0xC0FFEE, 9);
    let params = TerrainParams::default();
    group.bench_function("lod0_res32", |b| {
        b.iter(|| {
            let out = build_chunk_mesh(ChunkCoord::new(3, -2), 0, &seed, &params);
            black_box(out);
        })
    });
    group.bench_function("lod4_res32", |b| {
        b.iter(|| {
            let out = build_chunk_mesh(ChunkCoord::new(3, -2), 4, &seed, &params);
            black_box(out);
        })
    });
    group.finish();
}

fn short_warmup() -> Criterion {
    Criterion::default().warm_up_time(Duration::from_millis(300))
}

criterion_group! {
    name = benches;
    config = short_warmup();
    targets = bench_build_chunk
}
criterion_main!(benches);
