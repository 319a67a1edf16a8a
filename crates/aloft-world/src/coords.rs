use serde::{Deserialize, Serialize};

use crate::params::TerrainParams;

/// Position of a chunk in the infinite integer grid at some LOD level. The
/// same world point maps to different coordinates at each level because
/// chunk world size scales with `lod_scale^lod`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    /// Ring distance: the streaming tables work in square rings, so the
    /// metric is max-of-axes rather than Euclidean.
    #[inline]
    pub fn chebyshev(self, other: ChunkCoord) -> i32 {
        let dx = (self.cx - other.cx).abs();
        let dz = (self.cz - other.cz).abs();
        dx.max(dz)
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Edge length in world units of one chunk at `lod`.
#[inline]
pub fn chunk_world_size(params: &TerrainParams, lod: u32) -> f32 {
    params.chunk.size * params.chunk.lod_scale.powi(lod as i32)
}

/// Chunk containing the world point (x, z) at `lod`. Floor division, so
/// negative coordinates land in the right cell.
#[inline]
pub fn world_to_chunk(params: &TerrainParams, lod: u32, x: f32, z: f32) -> ChunkCoord {
    let size = chunk_world_size(params, lod);
    ChunkCoord::new((x / size).floor() as i32, (z / size).floor() as i32)
}

/// World position of the chunk's minimum corner.
#[inline]
pub fn chunk_origin(params: &TerrainParams, lod: u32, coord: ChunkCoord) -> (f32, f32) {
    let size = chunk_world_size(params, lod);
    (coord.cx as f32 * size, coord.cz as f32 * size)
}

#[inline]
pub fn chunk_center(params: &TerrainParams, lod: u32, coord: ChunkCoord) -> (f32, f32) {
    let size = chunk_world_size(params, lod);
    let (ox, oz) = chunk_origin(params, lod, coord);
    (ox + size * 0.5, oz + size * 0.5)
}
