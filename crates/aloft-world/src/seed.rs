use aloft_noise::Permutation256;

/// Tables generated per world by default; one per height-field octave.
pub const DEFAULT_TABLE_COUNT: usize = 9;

/// The world's entire persistent identity: a seed integer expanded into a
/// set of independent permutation tables. Sampling each octave through its
/// own table avoids the axis-aligned artifacts a single reused table shows
/// at stacked frequencies.
#[derive(Clone, Debug)]
pub struct WorldSeed {
    seed: u32,
    tables: Vec<Permutation256>,
}

impl WorldSeed {
    pub fn generate(seed: u32, count: usize) -> Self {
        let tables = (0..count as u64)
            .map(|i| Permutation256::from_seed(u64::from(seed) ^ i.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
            .collect();
        Self { seed, tables }
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    #[inline]
    pub fn tables(&self) -> &[Permutation256] {
        &self.tables
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
