use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Explicit, seedable random stream threaded through every generation step.
pub struct GenRng {
    inner: ChaCha8Rng,
}

impl GenRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.inner.gen_range(0.0f32..1.0)
    }

    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        p > 0.0 && self.unit() < p
    }

    /// Uniform in `lo..=hi`; collapses to `lo` when the range is empty.
    #[inline]
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            lo
        } else {
            self.inner.gen_range(lo..=hi)
        }
    }

    /// Uniform in `0..n`; `0` when `n == 0`.
    #[inline]
    pub fn below(&mut self, n: i32) -> i32 {
        if n <= 0 { 0 } else { self.inner.gen_range(0..n) }
    }

    /// Uniform in `(lo, hi)` pair form, as stored in config tuples.
    #[inline]
    pub fn span(&mut self, bounds: (i32, i32)) -> i32 {
        self.range(bounds.0, bounds.1)
    }
}
