use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

/// All tunables for terrain synthesis. One instance is shared by the mesh
/// generator, the streaming tables, the decoration placer, and direct height
/// queries, so every consumer sees the same world.
#[derive(Clone, Debug, Deserialize)]
pub struct TerrainParams {
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub chunk: Chunk,
    #[serde(default)]
    pub water: Water,
    #[serde(default)]
    pub decorations: Decorations,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            height: Height::default(),
            chunk: Chunk::default(),
            water: Water::default(),
            decorations: Decorations::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    /// Peak elevation in world units; the normalized octave sum is scaled by
    /// this, so elevations span [-amplitude, amplitude].
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    /// Wavelength of the lowest octave in world units.
    #[serde(default = "default_wavelength")]
    pub wavelength: f32,
}
fn default_amplitude() -> f32 {
    128.0
}
fn default_wavelength() -> f32 {
    1024.0
}
impl Default for Height {
    fn default() -> Self {
        Self {
            amplitude: default_amplitude(),
            wavelength: default_wavelength(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Chunk {
    /// Edge length of a LOD-0 chunk in world units.
    #[serde(default = "default_chunk_size")]
    pub size: f32,
    /// Quads per chunk edge; a chunk samples (resolution+1)^2 heights.
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// World-size multiplier between adjacent LOD levels.
    #[serde(default = "default_lod_scale")]
    pub lod_scale: f32,
}
fn default_chunk_size() -> f32 {
    384.0
}
fn default_resolution() -> u32 {
    32
}
fn default_lod_scale() -> f32 {
    2.0
}
impl Default for Chunk {
    fn default() -> Self {
        Self {
            size: default_chunk_size(),
            resolution: default_resolution(),
            lod_scale: default_lod_scale(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Water {
    #[serde(default)]
    pub level: f32,
}
impl Default for Water {
    fn default() -> Self {
        Self { level: 0.0 }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Decorations {
    /// Half-width of the covered square, in decoration chunks.
    #[serde(default = "default_deco_radius")]
    pub radius: i32,
    /// Candidate placements proposed per chunk.
    #[serde(default = "default_deco_per_chunk")]
    pub per_chunk: u32,
    /// Minimum clearance above water level for a placement.
    #[serde(default = "default_water_margin")]
    pub water_margin: f32,
    /// Gradient magnitude above which trees are always rejected.
    #[serde(default = "default_max_slope")]
    pub max_slope: f32,
}
fn default_deco_radius() -> i32 {
    14
}
fn default_deco_per_chunk() -> u32 {
    12
}
fn default_water_margin() -> f32 {
    4.0
}
fn default_max_slope() -> f32 {
    0.85
}
impl Default for Decorations {
    fn default() -> Self {
        Self {
            radius: default_deco_radius(),
            per_chunk: default_deco_per_chunk(),
            water_margin: default_water_margin(),
            max_slope: default_max_slope(),
        }
    }
}

/// Rejected parameter combinations. Fatal at construction time; nothing else
/// in the pipeline checks these again.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamError {
    NonPositiveChunkSize(f32),
    ZeroResolution,
    /// Resolutions above 255 would overflow the u16 mesh index space.
    ResolutionTooHigh(u32),
    LodScaleBelowOne(f32),
    NonPositiveWavelength(f32),
    NonPositiveAmplitude(f32),
    NegativeDecorationRadius(i32),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::NonPositiveChunkSize(v) => {
                write!(f, "chunk size must be positive, got {v}")
            }
            ParamError::ZeroResolution => write!(f, "chunk resolution must be at least 1"),
            ParamError::ResolutionTooHigh(v) => {
                write!(f, "chunk resolution {v} exceeds the index-buffer limit of 255")
            }
            ParamError::LodScaleBelowOne(v) => {
                write!(f, "lod scale must be >= 1, got {v}")
            }
            ParamError::NonPositiveWavelength(v) => {
                write!(f, "height wavelength must be positive, got {v}")
            }
            ParamError::NonPositiveAmplitude(v) => {
                write!(f, "height amplitude must be positive, got {v}")
            }
            ParamError::NegativeDecorationRadius(v) => {
                write!(f, "decoration radius must be >= 0, got {v}")
            }
        }
    }
}

impl Error for ParamError {}

impl TerrainParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.chunk.size > 0.0) {
            return Err(ParamError::NonPositiveChunkSize(self.chunk.size));
        }
        if self.chunk.resolution == 0 {
            return Err(ParamError::ZeroResolution);
        }
        if self.chunk.resolution > 255 {
            return Err(ParamError::ResolutionTooHigh(self.chunk.resolution));
        }
        if !(self.chunk.lod_scale >= 1.0) {
            return Err(ParamError::LodScaleBelowOne(self.chunk.lod_scale));
        }
        if !(self.height.wavelength > 0.0) {
            return Err(ParamError::NonPositiveWavelength(self.height.wavelength));
        }
        if !(self.height.amplitude > 0.0) {
            return Err(ParamError::NonPositiveAmplitude(self.height.amplitude));
        }
        if self.decorations.radius < 0 {
            return Err(ParamError::NegativeDecorationRadius(self.decorations.radius));
        }
        Ok(())
    }
}

pub fn load_params_from_path(path: &Path) -> Result<TerrainParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let params: TerrainParams = toml::from_str(&s)?;
    params.validate()?;
    Ok(params)
}
