use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A bijective shuffle of `0..=255`, the lattice hash behind the noise
/// function. Immutable once built; the same seed always produces the same
/// table, which is what makes worlds reproducible from a single integer.
#[derive(Clone, PartialEq, Eq)]
pub struct Permutation256([u8; 256]);

impl Permutation256 {
    /// Fisher-Yates shuffle of the identity table over a ChaCha stream.
    /// ChaCha output is portable, so tables match across platforms.
    pub fn from_seed(seed: u64) -> Self {
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for i in (1..table.len()).rev() {
            let j = rng.random_range(0..=i);
            table.swap(i, j);
        }
        Self(table)
    }

    #[inline]
    pub fn as_array(&self) -> &[u8; 256] {
        &self.0
    }

    /// Table lookup with the lattice coordinate wrapped into 0..=255.
    #[inline]
    pub(crate) fn at(&self, i: i64) -> u8 {
        self.0[(i & 255) as usize]
    }

    /// Two-level hash of a lattice point, the classic `p[p[x] + y]`.
    #[inline]
    pub(crate) fn hash2(&self, x: i64, y: i64) -> u8 {
        self.at(i64::from(self.at(x)) + y)
    }
}

impl core::fmt::Debug for Permutation256 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Permutation256([{}, {}, {}, ..])", self.0[0], self.0[1], self.0[2])
    }
}
