use aloft_geom::Aabb;
use aloft_world::ChunkCoord;

use crate::mesh_build::MeshBuild;

/// A finished chunk mesh: immutable once built, regeneration goes through
/// eviction and a fresh build.
pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    pub lod: u32,
    pub bbox: Aabb,
    pub mesh: MeshBuild,
}
