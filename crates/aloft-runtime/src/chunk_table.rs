use aloft_mesh_cpu::ChunkMeshCPU;
use aloft_world::ChunkCoord;
use hashbrown::{HashMap, HashSet};

/// Streaming cache for one LOD level: chunk coordinate -> finished mesh.
///
/// Chunks inside `range` rings of the tracked center are wanted; residents
/// farther than `range + margin` are evicted. The gap between the two is the
/// hysteresis band that stops boundary chunks from thrashing as the
/// viewpoint wobbles across a chunk edge.
pub struct ChunkTable {
    lod: u32,
    range: i32,
    margin: i32,
    center: ChunkCoord,
    chunks: HashMap<ChunkCoord, ChunkMeshCPU>,
    pending: HashSet<ChunkCoord>,
}

impl ChunkTable {
    pub fn new(lod: u32, range: i32, margin: i32) -> Self {
        Self {
            lod,
            range,
            margin,
            center: ChunkCoord::new(0, 0),
            chunks: HashMap::new(),
            pending: HashSet::new(),
        }
    }

    #[inline]
    pub fn lod(&self) -> u32 {
        self.lod
    }

    #[inline]
    pub fn range(&self) -> i32 {
        self.range
    }

    #[inline]
    pub fn margin(&self) -> i32 {
        self.margin
    }

    #[inline]
    pub fn center(&self) -> ChunkCoord {
        self.center
    }

    #[inline]
    pub fn resident_count(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkMeshCPU> {
        self.chunks.get(&coord)
    }

    /// Read-only walk over resident chunks, for draw submission. Nothing
    /// partially built is ever visible here.
    pub fn iter(&self) -> impl Iterator<Item = (ChunkCoord, &ChunkMeshCPU)> {
        self.chunks.iter().map(|(c, m)| (*c, m))
    }

    /// Moves the tracked center. Evicts residents beyond the hysteresis
    /// bound, drops pending marks that fell out of range, and returns the
    /// in-range coordinates that still need generation, nearest ring first.
    /// Eviction runs before any new generation so peak memory stays bounded.
    pub fn retarget(&mut self, center: ChunkCoord) -> (Vec<ChunkCoord>, usize) {
        self.center = center;
        let evict_limit = self.range + self.margin;
        let before = self.chunks.len();
        self.chunks
            .retain(|coord, _| center.chebyshev(*coord) <= evict_limit);
        let evicted = before - self.chunks.len();

        self.pending
            .retain(|coord| center.chebyshev(*coord) <= self.range);

        let mut missing = Vec::new();
        for dz in -self.range..=self.range {
            for dx in -self.range..=self.range {
                let coord = center.offset(dx, dz);
                if !self.chunks.contains_key(&coord) && !self.pending.contains(&coord) {
                    missing.push(coord);
                }
            }
        }
        missing.sort_by_key(|coord| center.chebyshev(*coord));
        (missing, evicted)
    }

    /// Marks a coordinate as generating (absent -> generating).
    pub fn mark_pending(&mut self, coord: ChunkCoord) {
        self.pending.insert(coord);
    }

    #[inline]
    pub fn is_pending(&self, coord: ChunkCoord) -> bool {
        self.pending.contains(&coord)
    }

    /// Accepts a finished mesh (generating -> resident). Returns false and
    /// discards the mesh when the chunk has left the kept region while it
    /// was being built; in-flight work is allowed to finish and is then
    /// dropped, never observed by readers.
    pub fn insert(&mut self, mesh: ChunkMeshCPU) -> bool {
        let coord = mesh.coord;
        self.pending.remove(&coord);
        if self.center.chebyshev(coord) > self.range + self.margin {
            return false;
        }
        self.chunks.insert(coord, mesh);
        true
    }
}
