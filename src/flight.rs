use aloft_geom::{Transform, Vec3};
use aloft_world::{TerrainParams, WorldSeed, height_at, is_below_terrain};

/// How far above the ground the flier tries to cruise.
const CRUISE_CLEARANCE: f32 = 60.0;
/// Minimum altitude over open water.
const WATER_CLEARANCE: f32 = 40.0;
/// Climb/dive rate limit in world units per second.
const CLIMB_RATE: f32 = 20.0;

/// Scripted stand-in for the player plane: a slow, seed-derived heading
/// drift, terrain-following altitude, and the same crash predicate the
/// game applies to planes and bullets.
pub struct Flier {
    transform: Transform,
    speed: f32,
    drift: f32,
    crashed: bool,
}

impl Flier {
    pub fn new(spawn: Vec3, speed: f32, seed: u32) -> Self {
        // Heading drift in [-0.3, 0.3] rad/s so different seeds trace
        // different arcs over the world.
        let drift = ((seed % 61) as f32 / 60.0 - 0.5) * 0.6;
        Self {
            transform: Transform::new(spawn, 0.0, 1.0),
            speed,
            drift,
            crashed: false,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[inline]
    pub fn crashed(&self) -> bool {
        self.crashed
    }

    pub fn advance(&mut self, dt: f32, seed: &WorldSeed, params: &TerrainParams) {
        if self.crashed {
            return;
        }
        self.transform.rotation_y += self.drift * dt;
        self.transform.position += self.transform.forward() * (self.speed * dt);

        let p = self.transform.position;
        let ground = height_at(p.x, p.z, seed, params);
        let cruise = (ground + CRUISE_CLEARANCE).max(params.water.level + WATER_CLEARANCE);
        let correction = (cruise - p.y).clamp(-CLIMB_RATE * dt, CLIMB_RATE * dt);
        self.transform.position.y += correction;

        if is_below_terrain(self.transform.position, seed, params) {
            self.crashed = true;
        }
    }
}
