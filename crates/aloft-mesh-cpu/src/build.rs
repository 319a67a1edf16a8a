use aloft_geom::{Aabb, Vec3};
use aloft_world::{ChunkCoord, TerrainParams, WorldSeed, chunk_origin, chunk_world_size, height_at};

use crate::chunk::ChunkMeshCPU;
use crate::mesh_build::MeshBuild;

/// Builds the mesh for one chunk at one LOD level.
///
/// Samples a (res+1)^2 grid over the LOD-scaled chunk square. Heights come
/// from `height_at`, the engine-wide evaluation path, so mesh vertices agree
/// bit-for-bit with direct queries at the same (x, z). A LOD-(L+1) chunk
/// samples at twice the LOD-L spacing, which makes every shared boundary
/// sample land on a LOD-L sample position — adjacent rings meet without
/// height cracks.
pub fn build_chunk_mesh(
    coord: ChunkCoord,
    lod: u32,
    seed: &WorldSeed,
    params: &TerrainParams,
) -> ChunkMeshCPU {
    let res = params.chunk.resolution as usize;
    let size = chunk_world_size(params, lod);
    let (ox, oz) = chunk_origin(params, lod, coord);
    let step = size / res as f32;

    let mut mesh = MeshBuild::default();
    mesh.reserve_grid(res);
    let mut bbox: Option<Aabb> = None;

    for j in 0..=res {
        for i in 0..=res {
            let x = ox + i as f32 * step;
            let z = oz + j as f32 * step;
            let h = height_at(x, z, seed, params);
            let p = Vec3::new(x, h, z);
            let n = vertex_normal(x, z, step, seed, params);
            let uv = (i as f32 / res as f32, j as f32 / res as f32);
            mesh.push_vertex(p, n, uv);
            match bbox.as_mut() {
                Some(bb) => bb.expand(p),
                None => bbox = Some(Aabb::new(p, p)),
            }
        }
    }

    let stride = res as u16 + 1;
    for j in 0..res as u16 {
        for i in 0..res as u16 {
            let a = j * stride + i;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            // CCW seen from above, for back-face culling.
            mesh.push_triangle(a, c, b);
            mesh.push_triangle(b, c, d);
        }
    }

    let bbox = bbox.unwrap_or_default();
    log::trace!(
        "built chunk ({}, {}) lod {} with {} vertices",
        coord.cx,
        coord.cz,
        lod,
        mesh.vertex_count()
    );
    ChunkMeshCPU {
        coord,
        lod,
        bbox,
        mesh,
    }
}

/// Surface normal from central differences of the height field. Sampling the
/// field rather than the triangle faces keeps shading continuous across
/// chunk borders.
fn vertex_normal(x: f32, z: f32, step: f32, seed: &WorldSeed, params: &TerrainParams) -> Vec3 {
    let hl = height_at(x - step, z, seed, params);
    let hr = height_at(x + step, z, seed, params);
    let hd = height_at(x, z - step, seed, params);
    let hu = height_at(x, z + step, seed, params);
    Vec3::new(hl - hr, 2.0 * step, hd - hu).normalized()
}
