//! Seeded Random Number Generator
//!
//! Xorshift128+ behind a small f64-oriented API. Given the same seed the
//! generator produces the same sequence on every platform, which is all the
//! reproducibility this game promises: arena generation takes a fixed seed,
//! gameplay takes a varying one.

use serde::{Deserialize, Serialize};

use super::vec2::{Bounds, Vec2};

/// Seeded PRNG using the Xorshift128+ algorithm.
///
/// # Example
///
/// ```
/// use serpent_arena::core::rng::GameRng;
///
/// let mut rng = GameRng::new(7);
/// let value = rng.next_u64();
/// assert_eq!(value, 7500778973487330291); // Always the same
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRng {
    state: [u64; 2],
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Xorshift state must never be all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random f64 in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        // 53 high bits give the full double mantissa
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Generate a random f64 in `[lo, hi)`. Returns `lo` when `lo >= hi`.
    #[inline]
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return lo;
        }
        lo + self.next_f64() * (hi - lo)
    }

    /// Generate a random integer in `[0, max)`. Returns 0 when `max` is 0.
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % max as u64) as u32
    }

    /// Generate a random integer in `[lo, hi]`.
    #[inline]
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if lo >= hi {
            return lo;
        }
        lo + self.next_int((hi - lo + 1) as u32) as i32
    }

    /// Random boolean that is true with probability `p`.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Random heading angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f64 {
        self.range(0.0, std::f64::consts::TAU)
    }

    /// Random point inside the arena, keeping `margin` from every edge.
    pub fn point_in(&mut self, bounds: &Bounds, margin: f64) -> Vec2 {
        Vec2::new(
            self.range(margin, bounds.width - margin),
            self.range(margin, bounds.height - margin),
        )
    }
}

/// SplitMix64 for seed initialization.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(54321);

        // Very unlikely to match
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_rng_known_values() {
        // Regression pin: these must never change, or seeded arenas shift
        let mut rng = GameRng::new(7);
        assert_eq!(rng.next_u64(), 7500778973487330291);
        assert_eq!(rng.next_u64(), 52560628696630943);
        assert_eq!(rng.next_u64(), 2309863518190720697);
    }

    #[test]
    fn test_next_f64_range() {
        let mut rng = GameRng::new(99);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_range() {
        let mut rng = GameRng::new(5678);
        for _ in 0..1000 {
            let v = rng.range(-10.0, 10.0);
            assert!((-10.0..10.0).contains(&v));
        }
        // Degenerate range
        assert_eq!(rng.range(5.0, 5.0), 5.0);
        assert_eq!(rng.range(5.0, 1.0), 5.0);
    }

    #[test]
    fn test_next_int() {
        let mut rng = GameRng::new(1234);
        for _ in 0..1000 {
            assert!(rng.next_int(100) < 100);
        }
        assert_eq!(rng.next_int(0), 0);
        assert_eq!(rng.next_int(1), 0);
    }

    #[test]
    fn test_range_i32() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let v = rng.range_i32(1, 4);
            assert!((1..=4).contains(&v));
        }
        assert_eq!(rng.range_i32(5, 5), 5);
    }

    #[test]
    fn test_point_in_bounds() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut rng = GameRng::new(7777);
        for _ in 0..100 {
            let p = rng.point_in(&bounds, 50.0);
            assert!(p.x >= 50.0 && p.x <= 750.0);
            assert!(p.y >= 50.0 && p.y <= 550.0);
        }
    }
}
