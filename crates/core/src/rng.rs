//! RNG module - deterministic random source
//!
//! A small LCG keeps every board reproducible from a single `u32` seed: the
//! same seed and the same sequence of engine calls always yield the same grid.
//!
//! The low bits of a power-of-two LCG cycle with tiny periods (bit 0 simply
//! alternates), so ranges are mapped from the high bits, and seeds are mixed
//! before use so that neighbouring seeds start far apart.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let seed = if seed == 0 { 1 } else { seed };
        Self::from_state(mix_seed(seed))
    }

    /// Resume from a value previously returned by [`SimpleRng::state`]
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales the full 32-bit output into the range, so the result comes from
    /// the high bits. `max` must be non-zero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Uniform index into a slice of length `len` (non-zero)
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }

    /// Pick one element uniformly, `None` for an empty slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_index(items.len());
        items.get(idx)
    }

    /// Current internal state (for replaying from this point)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// MurmurHash3 finalizer; a bijection on `u32`
fn mix_seed(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..20u32 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = SimpleRng::new(99);
        let empty: [u8; 0] = [];
        assert_eq!(rng.choose(&empty), None);

        let items = [3u8, 5, 8];
        for _ in 0..30 {
            let picked = rng.choose(&items).copied();
            assert!(matches!(picked, Some(3 | 5 | 8)));
        }
    }

    #[test]
    fn test_state_resumes_sequence() {
        let mut rng = SimpleRng::new(2024);
        rng.next_u32();
        let mut resumed = SimpleRng::from_state(rng.state());
        assert_eq!(rng.next_u32(), resumed.next_u32());
    }

    #[test]
    fn test_next_range_does_not_alternate() {
        for seed in 0..50u32 {
            let mut rng = SimpleRng::new(seed);
            let bits: Vec<u32> = (0..64).map(|_| rng.next_range(2)).collect();
            let ones = bits.iter().filter(|&&b| b == 1).count();
            assert!((12..=52).contains(&ones), "seed {seed}: {ones} ones in 64 draws");
            assert!(
                bits.windows(2).any(|w| w[0] == w[1]),
                "seed {seed}: draws strictly alternate"
            );
        }
    }

    #[test]
    fn test_next_range_covers_small_ranges() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [0u32; 8];
        for _ in 0..800 {
            seen[rng.next_range(8) as usize] += 1;
        }
        assert!(seen.iter().all(|&n| n > 50), "skewed buckets: {seen:?}");
    }

    #[test]
    fn test_adjacent_seeds_diverge_immediately() {
        let mut same = 0;
        for seed in 1..200u32 {
            let a = SimpleRng::new(seed).next_range(8);
            let b = SimpleRng::new(seed + 1).next_range(8);
            if a == b {
                same += 1;
            }
        }
        // Independent draws agree about 1 time in 8.
        assert!(same < 60, "{same} of 199 adjacent seeds agreed on the first draw");
    }
}
