use std::collections::HashMap;

use aloft_geom::{Transform, Vec3};

use crate::coords::ChunkCoord;
use crate::heightfield::{height_at, slope_at};
use crate::params::TerrainParams;
use crate::seed::WorldSeed;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecorationKind {
    Pine,
    Palm,
    Rock,
}

/// One placed prop instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub transform: Transform,
}

/// Deterministic prop placement over a fixed square of chunks around the
/// origin, generated once per session. Placement randomness comes from a
/// hash of (chunk coordinate, world seed), not from the noise tables, so
/// prop positions are decorrelated from elevation while both stay
/// reproducible from the one seed integer.
pub struct DecorationTable {
    radius: i32,
    chunk_size: f32,
    chunks: HashMap<ChunkCoord, Vec<Decoration>>,
}

/// Palms keep to this band above water; everything higher gets pines.
const PALM_BAND: f32 = 16.0;
/// Rocks survive slopes up to this multiple of the tree limit.
const ROCK_SLOPE_FACTOR: f32 = 2.0;

impl DecorationTable {
    pub fn new(radius: i32, chunk_size: f32) -> Self {
        Self {
            radius,
            chunk_size,
            chunks: HashMap::new(),
        }
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    /// Populates every chunk in the covered square. Existing contents are
    /// replaced, so regenerating with the same seed is idempotent.
    pub fn gen_decorations(&mut self, seed: &WorldSeed, params: &TerrainParams) {
        self.chunks.clear();
        for cz in -self.radius..=self.radius {
            for cx in -self.radius..=self.radius {
                let coord = ChunkCoord::new(cx, cz);
                let placed = gen_chunk_decorations(coord, self.chunk_size, seed, params);
                self.chunks.insert(coord, placed);
            }
        }
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&[Decoration]> {
        self.chunks.get(&coord).map(Vec::as_slice)
    }

    /// Read-only view for instanced draw submission.
    pub fn iter(&self) -> impl Iterator<Item = (ChunkCoord, &[Decoration])> {
        self.chunks.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn instance_count(&self) -> usize {
        self.chunks.values().map(Vec::len).sum()
    }
}

fn hash2(ix: i32, iz: i32, seed: u32) -> u32 {
    let mut h = (ix as u32).wrapping_mul(0x85eb_ca6b)
        ^ (iz as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

fn rand01(world_seed: u32, ix: i32, iz: i32, salt: u32) -> f32 {
    let h = hash2(ix, iz, (world_seed ^ salt).wrapping_add(0x9E37_79B9));
    ((h & 0x00FF_FFFF) as f32) / 16_777_216.0
}

/// Proposes `per_chunk` candidates and keeps the ones the terrain accepts.
/// Output order is acceptance order; the whole sequence is a pure function
/// of (coord, seed, params).
fn gen_chunk_decorations(
    coord: ChunkCoord,
    chunk_size: f32,
    seed: &WorldSeed,
    params: &TerrainParams,
) -> Vec<Decoration> {
    let ws = seed.seed();
    let (ox, oz) = (coord.cx as f32 * chunk_size, coord.cz as f32 * chunk_size);
    let mut placed = Vec::new();
    for i in 0..params.decorations.per_chunk {
        let salt = i << 3;
        let px = ox + rand01(ws, coord.cx, coord.cz, salt) * chunk_size;
        let pz = oz + rand01(ws, coord.cx, coord.cz, salt | 1) * chunk_size;

        let h = height_at(px, pz, seed, params);
        if h < params.water.level + params.decorations.water_margin {
            continue;
        }

        let kind = if rand01(ws, coord.cx, coord.cz, salt | 2) < 0.15 {
            DecorationKind::Rock
        } else if h < params.water.level + params.decorations.water_margin + PALM_BAND {
            DecorationKind::Palm
        } else {
            DecorationKind::Pine
        };

        let slope = slope_at(px, pz, seed, params);
        let limit = match kind {
            DecorationKind::Rock => params.decorations.max_slope * ROCK_SLOPE_FACTOR,
            _ => params.decorations.max_slope,
        };
        if slope >= limit {
            continue;
        }
        // Steeper ground keeps fewer props even under the hard limit.
        let steepness = slope / limit;
        if rand01(ws, coord.cx, coord.cz, salt | 3) < steepness * steepness {
            continue;
        }

        let rotation_y = rand01(ws, coord.cx, coord.cz, salt | 4) * core::f32::consts::TAU;
        let scale = 0.8 + rand01(ws, coord.cx, coord.cz, salt | 5) * 0.4;
        placed.push(Decoration {
            kind,
            transform: Transform::new(Vec3::new(px, h, pz), rotation_y, scale),
        });
    }
    placed
}
