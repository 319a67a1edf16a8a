use aloft_geom::Vec3;
use aloft_noise::noise;

use crate::params::TerrainParams;
use crate::seed::WorldSeed;

/// Probe distance for finite-difference gradients, in world units.
const SLOPE_STEP: f32 = 2.0;

/// Terrain elevation at a world point.
///
/// This is the single evaluation path for the whole engine: mesh sampling,
/// decoration placement, spawn heights, and collision all come through here,
/// so a position always has exactly one height regardless of who asks.
///
/// Octave `i` samples its own permutation table at twice the previous
/// octave's frequency and half its amplitude; the sum is normalized back to
/// [-1, 1] and scaled to world units.
pub fn height_at(x: f32, z: f32, seed: &WorldSeed, params: &TerrainParams) -> f32 {
    let mut wavelength = params.height.wavelength;
    let mut amp = 1.0f32;
    let mut sum = 0.0f32;
    let mut norm = 0.0f32;
    for table in seed.tables() {
        sum += noise(x / wavelength, z / wavelength, table) * amp;
        norm += amp;
        wavelength *= 0.5;
        amp *= 0.5;
    }
    if norm == 0.0 {
        return 0.0;
    }
    (sum / norm) * params.height.amplitude
}

/// Gradient magnitude of the height field, by central differences.
pub fn slope_at(x: f32, z: f32, seed: &WorldSeed, params: &TerrainParams) -> f32 {
    let hx = height_at(x + SLOPE_STEP, z, seed, params) - height_at(x - SLOPE_STEP, z, seed, params);
    let hz = height_at(x, z + SLOPE_STEP, seed, params) - height_at(x, z - SLOPE_STEP, seed, params);
    let dx = hx / (2.0 * SLOPE_STEP);
    let dz = hz / (2.0 * SLOPE_STEP);
    (dx * dx + dz * dz).sqrt()
}

/// Collision predicate used by flight and projectile checks: true when the
/// point is under the terrain surface.
#[inline]
pub fn is_below_terrain(p: Vec3, seed: &WorldSeed, params: &TerrainParams) -> bool {
    p.y < height_at(p.x, p.z, seed, params)
}
