//! World seed, height field, chunk coordinates, and decoration placement.
#![forbid(unsafe_code)]

mod coords;
mod decoration;
mod heightfield;
pub mod params;
mod seed;

pub use coords::{ChunkCoord, chunk_center, chunk_origin, chunk_world_size, world_to_chunk};
pub use decoration::{Decoration, DecorationKind, DecorationTable};
pub use heightfield::{height_at, is_below_terrain, slope_at};
pub use params::{ParamError, TerrainParams, load_params_from_path};
pub use seed::{DEFAULT_TABLE_COUNT, WorldSeed};
