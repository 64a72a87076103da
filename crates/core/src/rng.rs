//! RNG module - deterministic randomness for dealing
//!
//! A seeded LCG keeps the core fully deterministic: the same seed always
//! produces the same deal, which makes rounds replayable and tests exact.
//! No OS entropy is consumed anywhere in the core.

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
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Pick a uniformly random index into a collection of `len` elements.
    ///
    /// Returns 0 for `len == 0`; callers check emptiness first.
    pub fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.next_range(len as u32) as usize
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (used to derive follow-up seeds on restart).
    pub fn state(&self) -> u32 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_normalized() {
        let mut rng = SimpleRng::new(0);
        // Must not get stuck at zero.
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_pick_index_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for len in 1..=20usize {
            for _ in 0..50 {
                assert!(rng.pick_index(len) < len);
            }
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SimpleRng::new(99);
        let mut values: Vec<u32> = (0..52).collect();
        rng.shuffle(&mut values);

        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..52).collect::<Vec<u32>>());
    }
}
