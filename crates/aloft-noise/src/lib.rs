//! Seeded permutation tables and 2D gradient noise for terrain synthesis.
#![forbid(unsafe_code)]

mod perlin;
mod permutation;

pub use perlin::{noise, noise_tiled};
pub use permutation::Permutation256;
