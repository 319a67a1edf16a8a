//! Chunk streaming: per-LOD tables, generation workers, and the update policy.
#![forbid(unsafe_code)]

mod chunk_table;
mod runtime;

pub use chunk_table::ChunkTable;
pub use runtime::{GenJob, GenResult, Runtime};

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use aloft_geom::Vec3;
use aloft_world::{TerrainParams, WorldSeed, world_to_chunk};

/// Knobs for the streaming session.
#[derive(Clone, Debug)]
pub struct StreamerConfig {
    /// Number of LOD tables; level L chunks cover `lod_scale^L` times the
    /// base chunk area.
    pub lod_levels: u32,
    /// Rings of chunks kept resident around the viewpoint, per LOD.
    pub range: i32,
    /// Extra rings a resident may drift before eviction (hysteresis).
    pub margin: i32,
    /// Generation jobs submitted per update across all LODs. A teleport
    /// regenerates the whole ring over the following frames instead of
    /// stalling one.
    pub max_chunks_per_update: usize,
    /// Worker threads; 0 picks from available parallelism.
    pub workers: usize,
}

impl Default for StreamerConfig {
    fn default() -> Self {
        Self {
            lod_levels: 5,
            range: 4,
            margin: 1,
            max_chunks_per_update: 32,
            workers: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NoLodLevels,
    NonPositiveRange(i32),
    NegativeMargin(i32),
    ZeroUpdateBudget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoLodLevels => write!(f, "at least one LOD level is required"),
            ConfigError::NonPositiveRange(v) => {
                write!(f, "streaming range must be positive, got {v}")
            }
            ConfigError::NegativeMargin(v) => {
                write!(f, "eviction margin must be >= 0, got {v}")
            }
            ConfigError::ZeroUpdateBudget => {
                write!(f, "per-update chunk budget must be at least 1")
            }
        }
    }
}

impl Error for ConfigError {}

impl StreamerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lod_levels == 0 {
            return Err(ConfigError::NoLodLevels);
        }
        if self.range <= 0 {
            return Err(ConfigError::NonPositiveRange(self.range));
        }
        if self.margin < 0 {
            return Err(ConfigError::NegativeMargin(self.margin));
        }
        if self.max_chunks_per_update == 0 {
            return Err(ConfigError::ZeroUpdateBudget);
        }
        Ok(())
    }
}

/// Counters from one streaming call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Meshes inserted into tables.
    pub generated: usize,
    /// Residents dropped for leaving the kept region.
    pub evicted: usize,
    /// Jobs handed to the workers.
    pub submitted: usize,
    /// Jobs still outstanding after the call.
    pub pending: usize,
}

impl StreamStats {
    fn absorb(&mut self, other: StreamStats) {
        self.generated += other.generated;
        self.evicted += other.evicted;
        self.submitted += other.submitted;
        self.pending = other.pending;
    }
}

/// One streaming session: the world seed, terrain params, one chunk table
/// per LOD, and the generation workers. Pass a separate instance per world;
/// there is no process-global state.
pub struct TerrainStreamer {
    seed: Arc<WorldSeed>,
    params: Arc<TerrainParams>,
    tables: Vec<ChunkTable>,
    runtime: Runtime,
    budget: usize,
}

impl TerrainStreamer {
    pub fn new(
        seed: WorldSeed,
        params: TerrainParams,
        config: &StreamerConfig,
    ) -> Result<Self, Box<dyn Error>> {
        params.validate()?;
        config.validate()?;
        let seed = Arc::new(seed);
        let params = Arc::new(params);
        let tables = (0..config.lod_levels)
            .map(|lod| ChunkTable::new(lod, config.range, config.margin))
            .collect();
        let runtime = Runtime::new(Arc::clone(&seed), Arc::clone(&params), config.workers);
        log::info!(
            "streamer up: seed {}, {} LOD levels, range {}, {} workers",
            seed.seed(),
            config.lod_levels,
            config.range,
            runtime.workers
        );
        Ok(Self {
            seed,
            params,
            tables,
            runtime,
            budget: config.max_chunks_per_update,
        })
    }

    #[inline]
    pub fn seed(&self) -> &WorldSeed {
        &self.seed
    }

    #[inline]
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    #[inline]
    pub fn tables(&self) -> &[ChunkTable] {
        &self.tables
    }

    pub fn table(&self, lod: u32) -> Option<&ChunkTable> {
        self.tables.get(lod as usize)
    }

    pub fn resident_total(&self) -> usize {
        self.tables.iter().map(ChunkTable::resident_count).sum()
    }

    fn total_pending(&self) -> usize {
        self.tables.iter().map(ChunkTable::pending_count).sum()
    }

    /// Initial world population: requests every chunk in range of the
    /// viewpoint at every LOD and blocks until all of them are resident.
    pub fn generate_chunks(&mut self, viewpoint: Vec3) -> StreamStats {
        let mut stats = StreamStats::default();
        for table in &mut self.tables {
            let center = world_to_chunk(&self.params, table.lod(), viewpoint.x, viewpoint.z);
            let (missing, evicted) = table.retarget(center);
            stats.evicted += evicted;
            for coord in missing {
                table.mark_pending(coord);
                self.runtime.submit(coord, table.lod());
                stats.submitted += 1;
            }
        }
        self.drain_blocking(&mut stats);
        stats
    }

    /// Per-frame streaming update. Applies finished meshes, evicts chunks
    /// that left the kept region, and requests missing chunks near-to-far,
    /// at most `max_chunks_per_update` of them; the remainder stays absent
    /// and is picked up by following updates.
    pub fn generate_new_chunks(&mut self, viewpoint: Vec3) -> StreamStats {
        let mut stats = StreamStats::default();
        for result in self.runtime.drain() {
            self.apply_result(result, &mut stats);
        }
        let mut budget = self.budget;
        for ti in 0..self.tables.len() {
            let lod = self.tables[ti].lod();
            let center = world_to_chunk(&self.params, lod, viewpoint.x, viewpoint.z);
            let (missing, evicted) = self.tables[ti].retarget(center);
            stats.evicted += evicted;
            for coord in missing.into_iter().take(budget) {
                self.tables[ti].mark_pending(coord);
                self.runtime.submit(coord, lod);
                stats.submitted += 1;
                budget -= 1;
            }
        }
        stats.pending = self.total_pending();
        stats
    }

    /// Streaming update that keeps submitting and waiting until the resident
    /// set is complete for the given viewpoint. The demo uses it at spawn;
    /// tests use it to pin down exact post-update state.
    pub fn update_blocking(&mut self, viewpoint: Vec3) -> StreamStats {
        let mut stats = StreamStats::default();
        loop {
            let pass = self.generate_new_chunks(viewpoint);
            let idle = pass.submitted == 0;
            stats.absorb(pass);
            self.drain_blocking(&mut stats);
            if idle && self.total_pending() == 0 {
                return stats;
            }
        }
    }

    fn drain_blocking(&mut self, stats: &mut StreamStats) {
        while self.total_pending() > 0 {
            match self.runtime.recv_blocking() {
                Some(result) => self.apply_result(result, stats),
                None => break,
            }
        }
        stats.pending = self.total_pending();
    }

    fn apply_result(&mut self, result: GenResult, stats: &mut StreamStats) {
        let lod = result.mesh.lod as usize;
        let coord = result.mesh.coord;
        match self.tables.get_mut(lod) {
            Some(table) => {
                if table.insert(result.mesh) {
                    stats.generated += 1;
                    log::trace!(
                        "chunk ({}, {}) lod {} resident after {} ms",
                        coord.cx,
                        coord.cz,
                        lod,
                        result.t_gen_ms
                    );
                } else {
                    log::debug!(
                        "dropped stale chunk ({}, {}) lod {}",
                        coord.cx,
                        coord.cz,
                        lod
                    );
                }
            }
            None => log::warn!("result for unknown LOD {lod}"),
        }
    }
}
